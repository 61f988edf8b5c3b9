mod ccu_client;
mod config;
