//! 声明式 rest 绑定模块
//! - wrapper 类型声明一张 endpoint 表，建表时一次性校验
//! - RestClient 把表项变成属性读写和按参调用，一次调用一次往返
//! - I/O 全部走注入的 Transport，按流量类别共享

pub mod client;
pub mod entity;
pub mod table;
pub mod transport;
