//! # Host CLI
//!
//! 脚本引擎的命令行宿主：注册一组演示用原生函数，
//! 然后解析并执行脚本文件（或内联源码）。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p host-cli -- demo.script
//! cargo run -p host-cli -- --eval '$x = 1; log("hi");'
//! cargo run -p host-cli -- demo.script --verbose
//! ```
//!
//! ## 注册的函数
//!
//! - `log(String)`：打印到标准输出
//! - `msgbox(String, Number)`：打印"消息 + 数字"，返回拼接结果
//! - `nothing()`：什么也不做
//! - `add(Number, Number)`：返回两数之和

use anyhow::{Context, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use script_runtime::{ScriptEngine, Value, ValueKind};

#[derive(Parser)]
#[command(name = "host-cli")]
#[command(about = "脚本引擎命令行宿主 - 运行脚本文件")]
#[command(version)]
struct Cli {
    /// 脚本文件路径
    script: Option<PathBuf>,

    /// 直接执行内联源码，代替脚本文件
    #[arg(short, long)]
    eval: Option<String>,

    /// 输出调试日志（含执行后的变量表）
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let source = match (&cli.script, &cli.eval) {
        (_, Some(inline)) => inline.clone(),
        (Some(path), None) => std::fs::read_to_string(path)
            .with_context(|| format!("读取脚本文件失败: {}", path.display()))?,
        (None, None) => bail!("需要脚本文件路径或 --eval 源码"),
    };

    let mut engine = build_engine();

    engine.parse(&source).context("解析失败")?;
    debug!("解析完成，开始执行");
    engine.execute().context("执行失败")?;

    if cli.verbose {
        for name in engine.variable_names() {
            debug!("变量 {} = {:?}", name, engine.variable(name));
        }
    }

    Ok(())
}

/// 创建引擎并注册演示函数
fn build_engine() -> ScriptEngine {
    let mut engine = ScriptEngine::new();

    engine.register("log", vec![ValueKind::String], |args| {
        println!("{}", args[0].as_str().unwrap_or_default());
        Value::Null
    });

    engine.register(
        "msgbox",
        vec![ValueKind::String, ValueKind::Number],
        |args| {
            let text = args[0].as_str().unwrap_or_default();
            let number = args[1].as_number().unwrap_or_default();
            let message = format!("{}{}", text, number);
            info!("msgbox: {}", message);
            Value::String(message)
        },
    );

    engine.register("nothing", vec![], |_| Value::Null);

    engine.register(
        "add",
        vec![ValueKind::Number, ValueKind::Number],
        |args| {
            let a = args[0].as_number().unwrap_or_default();
            let b = args[1].as_number().unwrap_or_default();
            Value::Number(a + b)
        },
    );

    engine
}
