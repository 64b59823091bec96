//! 依次运行全部演示场景, 每个场景输出一张 PNG, 最后打印汇总.

mod result;
mod runner;

use log::LevelFilter;
use std::str::FromStr;

/// 日志等级取自 `$SCENES_LOG`, 缺省为 `info`.
fn log_level() -> LevelFilter {
    std::env::var("SCENES_LOG")
        .ok()
        .and_then(|s| LevelFilter::from_str(&s).ok())
        .unwrap_or(LevelFilter::Info)
}

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log_level())
        .init()?;
    let result = runner::run()?;
    result.analyze()?;
    Ok(())
}
