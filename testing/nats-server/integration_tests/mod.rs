mod config;
mod logger;
mod server;
