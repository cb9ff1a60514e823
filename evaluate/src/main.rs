//! 分かち書きの精度を評価するユーティリティ
//!
//! このバイナリは、正解の分かち書き済みコーパスを読み込み、各行の正解トークンを
//! 連結したテキストを分割し直して、トークン区間（文字位置の範囲）の一致で
//! 適合率（Precision）、再現率（Recall）、F1スコアを計算します。

use std::collections::HashSet;
use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use zhseg::{Dictionary, Mode, Model, Segmenter};

use clap::Parser;

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "evaluate", about = "Evaluates the segmentation accuracy")]
struct Args {
    /// Test corpus (one sentence per line, whitespace-separated gold tokens).
    #[clap(short = 't', long)]
    test_in: PathBuf,

    /// Dictionary files, loaded in the given order.
    #[clap(short = 'd', long)]
    dict: Vec<PathBuf>,

    /// CRF model file.
    #[clap(long)]
    model: Option<PathBuf>,

    /// Algorithm mode. Choices are dag, crf, and hybrid.
    #[clap(short = 'm', long, default_value = "hybrid")]
    mode: Mode,
}

/// トークン列を文字位置の区間集合に変換する
///
/// # 引数
///
/// * `tokens` - トークン列
///
/// # 戻り値
///
/// `(開始位置, 終了位置)`（終了位置は排他的）の集合
fn spans<S>(tokens: &[S]) -> HashSet<(usize, usize)>
where
    S: AsRef<str>,
{
    let mut spans = HashSet::new();
    let mut start = 0;
    for token in tokens {
        let len = token.as_ref().chars().count();
        spans.insert((start, start + len));
        start += len;
    }
    spans
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut dict = Dictionary::new();
    for path in &args.dict {
        dict.load_from_path(path)?;
        eprintln!("Loaded dictionary: {}", path.display());
    }

    let mut segmenter = Segmenter::new(Arc::new(dict));
    if let Some(path) = &args.model {
        let model = Model::from_path(path)?;
        eprintln!(
            "Loaded CRF model with {} features: {}",
            model.num_features(),
            path.display()
        );
        segmenter = segmenter.with_model(Arc::new(model));
    }

    let mut num_ref = 0;
    let mut num_sys = 0;
    let mut num_cor = 0;

    let rdr = BufReader::new(File::open(&args.test_in)?);
    for line in rdr.lines() {
        let line = line?;
        let gold: Vec<&str> = line.split_whitespace().collect();
        if gold.is_empty() {
            continue;
        }
        let text: String = gold.concat();
        let system = segmenter.cut(&text, args.mode);

        let refs = spans(&gold);
        let syss = spans(&system);
        num_ref += refs.len();
        num_sys += syss.len();
        num_cor += refs.intersection(&syss).count();
    }

    let precision = num_cor as f64 / num_sys as f64;
    let recall = num_cor as f64 / num_ref as f64;
    let f1 = 2.0 * precision * recall / (precision + recall);
    println!("Precision = {precision}");
    println!("Recall = {recall}");
    println!("F1 = {f1}");

    Ok(())
}
