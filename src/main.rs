// ==========================================
// 云安全基线管理系统 - 命令行主入口
// ==========================================
// 职责: 进程启动（配置 → 日志 → AppState），分发子命令
// 输出: 每个命令向 stdout 打印 JSON 响应信封
// ==========================================

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use cloud_baseline::api::ApiResponse;
use cloud_baseline::app::{commands, AppState};
use cloud_baseline::config::AppConfig;
use cloud_baseline::domain::query::param_keys;
use cloud_baseline::domain::{ProductInput, ProviderInput};
use cloud_baseline::logging;

#[derive(Parser, Debug)]
#[command(name = "cloud-baseline", version, about = "云安全基线管理系统")]
struct Cli {
    /// 配置文件路径（JSON）
    #[arg(long, short, global = true, env = "CLOUD_BASELINE_CONFIG")]
    config: Option<PathBuf>,

    /// 数据库路径（覆盖配置文件）
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 初始化数据库（幂等）
    InitDb,

    /// 云服务商管理
    #[command(subcommand)]
    Provider(ProviderCommands),

    /// 云产品管理
    #[command(subcommand)]
    Product(ProductCommands),

    /// 安全配置项管理
    #[command(subcommand)]
    Item(ItemCommands),
}

#[derive(Subcommand, Debug)]
enum ProviderCommands {
    /// 新增云服务商
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// 列出全部云服务商
    List,
    /// 删除云服务商（不级联）
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum ProductCommands {
    /// 新增云产品
    Add {
        #[arg(long)]
        provider_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// 列出云产品
    List {
        #[arg(long)]
        provider_id: Option<String>,
        #[arg(long, conflicts_with = "provider_id")]
        provider_code: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ItemCommands {
    /// 过滤分页查询
    List(FilterArgs),
    /// 从 .csv/.xlsx/.xls 文件导入
    Import { file: PathBuf },
    /// 按过滤条件导出 CSV（单次最多 100 条）
    Export(FilterArgs),
}

/// 过滤参数按原始字符串传递，解析规则与查询参数一致
#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long)]
    provider_id: Option<String>,
    #[arg(long)]
    product_id: Option<String>,
    #[arg(long)]
    keyword: Option<String>,
    #[arg(long)]
    page: Option<String>,
    #[arg(long)]
    page_size: Option<String>,
}

impl FilterArgs {
    fn to_params(&self) -> HashMap<String, String> {
        [
            (param_keys::PROVIDER_ID, &self.provider_id),
            (param_keys::PRODUCT_ID, &self.product_id),
            (param_keys::KEYWORD, &self.keyword),
            (param_keys::PAGE, &self.page),
            (param_keys::PAGE_SIZE, &self.page_size),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.as_ref().map(|v| (k.to_string(), v.clone())))
        .collect()
    }
}

fn print<T: Serialize>(resp: ApiResponse<T>) -> anyhow::Result<bool> {
    println!("{}", serde_json::to_string_pretty(&resp)?);
    Ok(resp.is_success())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("加载配置失败")?;
    if let Some(db) = &cli.db {
        config.database.path = db.clone();
    }

    logging::init(&config.log);
    tracing::info!("{} v{}", cloud_baseline::APP_NAME, cloud_baseline::VERSION);

    let state = AppState::new(config).map_err(anyhow::Error::msg)?;

    let ok = match cli.command {
        Commands::InitDb => {
            tracing::info!(db_path = %state.db_path(), "数据库已就绪");
            print(ApiResponse::success(state.db_path().to_string()))?
        }
        Commands::Provider(cmd) => match cmd {
            ProviderCommands::Add {
                name,
                code,
                description,
            } => print(commands::create_provider(
                &state,
                ProviderInput {
                    name,
                    code,
                    description,
                },
            ))?,
            ProviderCommands::List => print(commands::list_providers(&state))?,
            ProviderCommands::Delete { id } => print(commands::delete_provider(&state, &id))?,
        },
        Commands::Product(cmd) => match cmd {
            ProductCommands::Add {
                provider_id,
                name,
                code,
                description,
            } => print(commands::create_product(
                &state,
                ProductInput {
                    cloud_provider_id: provider_id,
                    name,
                    code,
                    description,
                },
            ))?,
            ProductCommands::List {
                provider_id,
                provider_code,
            } => print(commands::list_products(
                &state,
                provider_id.as_deref(),
                provider_code.as_deref(),
            ))?,
        },
        Commands::Item(cmd) => match cmd {
            ItemCommands::List(filter) => {
                print(commands::query_config_items(&state, &filter.to_params()))?
            }
            ItemCommands::Import { file } => {
                print(commands::import_config_items(&state, &file).await)?
            }
            ItemCommands::Export(filter) => {
                print(commands::export_config_items(&state, &filter.to_params()))?
            }
        },
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
