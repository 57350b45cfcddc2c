//! Input validation helpers shared by the interactive shell.

pub mod validation;
