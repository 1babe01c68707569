use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use visionguide::{cli, config, prompt, report, scanner, transport};
use visionguide_common::{
    view, ApiEndpoints, Client, LookupKind, LookupRequest, RecognitionPage, StatusKind, ViewState,
};

use cli::{Cli, Commands};
use config::Config;
use transport::ReqwestTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut config = Config::load().context("設定ファイルを読み込めません")?;
    let server = config.resolve_server(cli.server.as_deref());
    let location = cli
        .location
        .clone()
        .unwrap_or_else(|| config.default_location.clone());

    match cli.command {
        Commands::Upload { paths, recursive } => {
            let page = prompt::resolve_page(cli.page, config.default_page)?;
            println!("📸 visionguide - {}\n", page.title());

            let files = scanner::collect_candidates(&paths, recursive)?;
            println!("✔ {}枚の画像を送信します\n", files.len());

            let mut state = ViewState::new(page);
            state.set_location(location);
            state.add_files(files);

            let client = Client::new(ReqwestTransport::new()?, ApiEndpoints::new(&server));

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
            spinner.enable_steady_tick(Duration::from_millis(120));
            spinner.set_message(format!("Analyzing {}...", page.subject_noun()));

            view::submit(&mut state, &client).await;
            spinner.finish_and_clear();

            print!("{}", report::render_state(&state, client.endpoints()));

            if let Some(status) = state.status() {
                if status.kind == StatusKind::Error {
                    bail!("{}", status.text);
                }
            }
        }

        Commands::Describe { name } => {
            let page = prompt::resolve_page(cli.page, config.default_page)?;
            if !page.fetches_description() {
                bail!("{}には説明文の問い合わせがありません", page.title());
            }
            let client = Client::new(ReqwestTransport::new()?, ApiEndpoints::new(&server));
            let request = single_lookup(LookupKind::Description, page, name, location);
            let reply = client.lookup(&request).await?;
            print!("{}", report::render_lookup(page, &reply));
        }

        Commands::Suggest { name } => {
            let page = prompt::resolve_page(cli.page, config.default_page)?;
            let client = Client::new(ReqwestTransport::new()?, ApiEndpoints::new(&server));
            let request = single_lookup(LookupKind::Suggestions, page, name, location);
            let reply = client.lookup(&request).await?;
            print!("{}", report::render_lookup(page, &reply));
        }

        Commands::Config {
            set_server,
            set_location,
            set_page,
            show,
        } => {
            let mut changed = false;

            if let Some(url) = set_server {
                config.set_server(&url)?;
                changed = true;
                println!("✔ サーバーURLを設定しました");
            }
            if let Some(place) = set_location {
                config.set_location(&place);
                changed = true;
                println!("✔ 既定の場所を設定しました");
            }
            if let Some(page) = set_page {
                config.default_page = Some(page);
                changed = true;
                println!("✔ 既定の認識の種類を設定しました");
            }
            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定: {}", Config::config_path()?.display());
                println!("  サーバー: {}", config.server_url);
                println!("  実際の接続先: {}", server);
                println!("  場所: {}", config.default_location);
                println!(
                    "  認識の種類: {}",
                    config
                        .default_page
                        .map_or("未設定（実行時に選択）".to_string(), |p| p.to_string())
                );
            }
        }
    }

    Ok(())
}

fn single_lookup(
    kind: LookupKind,
    page: RecognitionPage,
    subject: String,
    location: String,
) -> LookupRequest {
    LookupRequest {
        generation: 0,
        kind,
        page,
        subject,
        location,
    }
}

/// ログは標準エラーへ（標準出力は結果だけにする）
fn setup_logging(verbose: bool) {
    let level = if verbose { "visionguide=debug,visionguide_common=debug" } else { "visionguide=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
