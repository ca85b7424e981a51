use anyhow::{anyhow, Context, Result};
use clap::Parser;
use fic_dashboard::config::{self, ApplicationConfig, LogConfig};
use fic_dashboard::dashboard::{Dashboard, DashboardOptions, PromptSelector, Selection};
use fic_dashboard::data_provider::{DataFetcher, FileFetcher, SocrataFetcher};
use std::io;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "fic_dashboard", about = "Análisis de Rentabilidades de Fondos de Inversión Colectiva (FIC)")]
struct Cli {
    /// 篩選欄位；未提供時互動式選擇
    #[arg(short, long)]
    column: Option<String>,

    /// 篩選值；未提供時互動式選擇
    #[arg(short, long)]
    value: Option<String>,

    /// 覆寫配置中的 API 權杖
    #[arg(long)]
    token: Option<String>,

    /// 從本地 JSON 檔讀取資料，而非呼叫 API
    #[arg(long)]
    input: Option<PathBuf>,

    /// 圖表輸出目錄
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 預覽行數
    #[arg(long)]
    preview_rows: Option<usize>,

    /// 只列出 --column 的相異值後結束
    #[arg(long, requires = "column")]
    list_values: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化配置
    let mut app_config: ApplicationConfig = config::init_config()
        .context("無法加載應用程序配置")?
        .clone();
    apply_overrides(&mut app_config, &cli);

    // 初始化日誌系統
    init_logging(&app_config.log)?;

    // 覆寫後再驗證；呼叫 API 時缺少權杖視為錯誤
    let remote = cli.input.is_none();
    if let Err(err) = app_config.validate_for(remote) {
        error!("配置驗證失敗: {}", err);
        return Err(anyhow!("配置驗證失敗: {}", err));
    }

    let fetcher: Box<dyn DataFetcher> = match &cli.input {
        Some(path) => Box::new(FileFetcher::new(path)),
        None => Box::new(SocrataFetcher::from_config(&app_config.api).context("無法建立 API 客戶端")?),
    };

    let options = DashboardOptions {
        preview_rows: app_config.dashboard.preview_rows,
        output_dir: app_config.dashboard.output_dir.clone(),
    };
    let mut dashboard = Dashboard::new(io::stdout().lock(), options);

    if cli.list_values {
        let column = cli.column.as_deref().unwrap_or_default();
        let df = dashboard.load(fetcher.as_ref()).await?;
        dashboard.list_values(&df, column)?;
        return Ok(());
    }

    let selection = Selection {
        column: cli.column.clone(),
        value: cli.value.clone(),
    };
    let mut selector = PromptSelector::new(io::stdin().lock(), io::stderr());

    let report = dashboard
        .run(fetcher.as_ref(), &selection, &mut selector)
        .await
        .context("儀表板執行失敗")?;

    info!(
        rows = report.filtered_rows,
        entities = report.by_entity.len(),
        dates = report.over_time.len(),
        "儀表板完成"
    );
    Ok(())
}

// 命令列參數優先於配置文件與環境變數
fn apply_overrides(app_config: &mut ApplicationConfig, cli: &Cli) {
    if let Some(token) = &cli.token {
        app_config.api.token = token.clone();
    }
    if let Some(output) = &cli.output {
        app_config.dashboard.output_dir = output.clone();
    }
    if let Some(rows) = cli.preview_rows {
        app_config.dashboard.preview_rows = rows;
    }
}

// 初始化日誌系統，輸出至 stderr 以免干擾儀表板內容
fn init_logging(log_config: &LogConfig) -> Result<()> {
    let level = match log_config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO, // 默認為INFO
    };

    // RUST_LOG 優先於配置
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    let result = if log_config.format.eq_ignore_ascii_case("json") {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;

    info!("日誌系統初始化完成");
    Ok(())
}
