use std::{env, num::ParseIntError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Reads `ZONEKIT_HOST` and `ZONEKIT_PORT`, falling back to `0.0.0.0:3000`.
    pub fn from_env() -> Result<Self, ParseIntError> {
        let host = env::var("ZONEKIT_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("ZONEKIT_PORT") {
            Ok(value) => value.parse()?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self { host, port })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
