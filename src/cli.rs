use clap::{Parser, Subcommand};
use std::path::PathBuf;
use visionguide_common::RecognitionPage;

#[derive(Parser)]
#[command(name = "visionguide")]
#[command(about = "アート・料理・建築の画像認識クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 認識サーバーのURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// 認識の種類 (art/food/architecture)
    #[arg(short, long, global = true)]
    pub page: Option<RecognitionPage>,

    /// レストラン検索の場所（料理のみ）
    #[arg(short, long, global = true)]
    pub location: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像をアップロードして認識結果を表示
    Upload {
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// 名前から説明文を取得（アート・建築）
    Describe {
        /// 作品名・建物名
        #[arg(required = true)]
        name: String,
    },

    /// 名前から似ているもの・レストランを取得
    Suggest {
        /// 作品名・料理名・建物名
        #[arg(required = true)]
        name: String,
    },

    /// 設定を表示/編集
    Config {
        /// サーバーURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// 既定の場所を設定
        #[arg(long)]
        set_location: Option<String>,

        /// 既定の認識の種類を設定
        #[arg(long)]
        set_page: Option<RecognitionPage>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
