//! # zhseg
//!
//! zhsegは、辞書ベースのDAG分割と線形連鎖CRFを組み合わせた中国語の
//! 分かち書きエンジンです。
//!
//! ## 概要
//!
//! このライブラリは、生のテキストを単語トークンの列に分割する機能と、
//! 分かち書き済みコーパスからCRFモデルの重みを学習する機能を提供します。
//! 位置の単位はすべてUnicodeスカラー値（文字）であり、バイトは使いません。
//!
//! ## 主な機能
//!
//! - **DAG分割**: 辞書の候補グラフに対する最大対数確率の動的計画法
//! - **CRF分割**: B/M/E/Sタグ付けのViterbi復号による未知語の分割
//! - **ハイブリッド分割**: 辞書ヒットを信頼し、未知語の連なりだけをCRFで修復
//! - **検索向け分割**: 辞書に存在する部分文字列も合わせて列挙
//! - **学習**: 構造化パーセプトロンによるCRF重みの学習
//!
//! ## 使用例
//!
//! ```
//! use std::sync::Arc;
//! use zhseg::{Dictionary, Mode, Segmenter};
//!
//! let mut dict = Dictionary::new();
//! dict.load_from_reader("南京市 100\n长江大桥 100\n南京 10\n市长 10\n".as_bytes())?;
//!
//! let segmenter = Segmenter::new(Arc::new(dict));
//!
//! let tokens = segmenter.cut("南京市长江大桥", Mode::Dag);
//! assert_eq!(tokens, ["南京市", "长江大桥"]);
//! # Ok::<(), zhseg::errors::ZhsegError>(())
//! ```

/// 文字種の判定
pub mod chars;

/// 線形連鎖CRF（タグ、モデル、素性抽出、Viterbi復号）
pub mod crf;

/// 頻度辞書
pub mod dictionary;

/// エラー型の定義
pub mod errors;

/// 分かち書きエンジン
pub mod segmenter;

/// 構造化パーセプトロンによる学習
pub mod trainer;

#[cfg(test)]
mod tests;

// Re-exports
pub use crf::{Model, Tag};
pub use dictionary::Dictionary;
pub use segmenter::{Mode, Segmenter};
pub use trainer::{Corpus, Sentence, Trainer};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
