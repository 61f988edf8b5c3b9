mod error;
mod helpers;
mod v2;
mod v3;
