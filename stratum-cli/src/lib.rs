//! Stratum CLI - command-line interface for manual SQL schema migrations.
//!
//! This crate provides the `stratum` binary: applying and reverting
//! numbered migration units, stamping and removing ledger entries, project
//! scaffolding, and thin vendor shell-outs for create/drop/dump.

pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
