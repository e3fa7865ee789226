pub mod seir;
pub use seir::*;
