use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "認証情報が見つかりません。以下のいずれかで設定してください:\n\
        - 環境変数 TENCENTCLOUD_SECRET_ID / TENCENTCLOUD_SECRET_KEY\n\
        - カレントディレクトリ: tcform.local.yaml, tcform.yaml の provider セクション\n\
        - ./.tcform/config.yaml\n\
        - ~/.config/tcform/config.yaml\n\
        または TCFORM_CONFIG_PATH 環境変数で設定ファイルを直接指定できます"
    )]
    MissingCredentials,

    #[error("設定ファイルの解析に失敗しました ({path}): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
