mod config;
mod error;
mod signer;
mod v3_types;
