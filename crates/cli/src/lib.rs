//! Pieces shared by the `kubegen` command-line front-ends.

pub mod config;
