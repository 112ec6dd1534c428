//! Repository management modules.
//!
//! This module contains the file-backed services that read and write recipe records.

pub mod recipes;
