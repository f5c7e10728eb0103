//! setting config file

use std::{fs::File, io::Read};
use lazy_static::lazy_static;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize)]
pub struct Env {
    pub env: String,
    pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Device {
    pub hostname: String,
    pub rest_port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Rest {
    // analyser 类接口用的短超时，generator 类接口用的长超时，单位秒
    pub fast_timeout_secs: u64,
    pub slow_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub env: Env,
    pub device: Device,
    pub rest: Rest,
}

impl Default for Settings {
    fn default() -> Self {
        // 允许用 .env 文件提供 ENV
        dotenv::dotenv().ok();

        let env = match env::var("ENV") {
            Ok(e) => e,
            Err(_) => {
                log::warn!("no ENV set, use default: 'dev'");
                String::from("dev")
            }
        };

        let file_path: String = format!("config_{}.toml", env);

        let mut file = match File::open(file_path.as_str()) {
            Ok(f) => f,
            Err(e) => panic!("no such file {} exception:{}", file_path.as_str(), e),
        };

        let mut str_val = String::new();

        match file.read_to_string(&mut str_val) {
            Ok(s) => s,
            Err(e) => panic!("cannot read config file: {}", e),
        };

        toml::from_str(&str_val).expect("config file format invalid")
    }
}

impl Settings {
    pub fn get<'a>() -> &'a Self {
        // 给静态变量延迟赋值的宏
        lazy_static! {
            static ref CACHE: Settings = Settings::default();
        }
        &CACHE
    }
}
