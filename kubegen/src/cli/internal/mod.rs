//! Pieces shared by several CLI commands.

mod parameters;

pub use self::parameters::GenerationArgs;
