mod engine;
mod required_keys;
mod scenarios;
mod utils;
