use crate::Real;
use std::iter;

/// ASCII plot of a sequence of non-negative values.
///
/// Each point is drawn as a column filled with '*'s up to its height, the
/// largest value reaching `height` rows. Returns one line per row, top first.
pub fn render_vbars(values: &[Real], height: usize) -> String {
    let max = values.iter().cloned().fold(0.0, Real::max);
    if values.is_empty() || height == 0 || max <= 0.0 {
        return String::new();
    }
    let step = max / height as Real;

    let mut lines = Vec::with_capacity(height);
    for i in 0..height {
        let h = (height - i) as Real * step;
        let ln: String = values
            .iter()
            .map(|&x| if x >= h - 0.5 * step { '*' } else { ' ' })
            .collect();
        lines.push(ln.trim_end().to_string());
    }
    lines.join("\n")
}

/// Horizontal variant of [`render_vbars`]: one labelled bar per value.
pub fn render_hbars<L: AsRef<str>>(labels: &[L], values: &[Real], width: usize) -> String {
    let max = values.iter().cloned().fold(0.0, Real::max);
    let pad = labels.iter().map(|l| l.as_ref().len()).max().unwrap_or(0);
    let mut lines = Vec::with_capacity(values.len());
    for (label, &x) in labels.iter().zip(values) {
        let n = if max > 0.0 {
            (x / max * width as Real).round() as usize
        } else {
            0
        };
        let bar: String = iter::repeat('=').take(n).collect();
        lines.push(format!("{:>pad$} |{}", label.as_ref(), bar, pad = pad));
    }
    lines.join("\n")
}

/// Keep every k-th value so that at most `width` points remain.
pub fn downsample(values: &[Real], width: usize) -> Vec<Real> {
    if width == 0 || values.len() <= width {
        return values.to_vec();
    }
    let k = (values.len() + width - 1) / width;
    values.iter().step_by(k).cloned().collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn vbars_peak_fills_every_row() {
        let plot = render_vbars(&[0.0, 2.0, 4.0, 2.0], 2);
        let lines: Vec<&str> = plot.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "  *");
        assert_eq!(lines[1], " ***");
    }

    #[test]
    fn vbars_of_zeros_is_empty() {
        assert_eq!(render_vbars(&[0.0, 0.0], 5), "");
        assert_eq!(render_vbars(&[], 5), "");
    }

    #[test]
    fn hbars_scale_to_width() {
        let plot = render_hbars(&["a", "bb"], &[5.0, 10.0], 4);
        assert_eq!(plot, " a |==\nbb |====");
    }

    #[test]
    fn downsample_keeps_width() {
        let values: Vec<Real> = (0..365).map(|x| x as Real).collect();
        let small = downsample(&values, 73);
        assert_eq!(small.len(), 73);
        assert_eq!(small[1], 5.0);
        assert_eq!(downsample(&values[..10], 73).len(), 10);
    }
}
