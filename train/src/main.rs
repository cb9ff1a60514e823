//! CRFモデルを学習するユーティリティ
//!
//! このバイナリは、分かち書き済みコーパス（1行1文、空白区切り）から
//! 構造化パーセプトロンでCRFモデルを学習し、テキスト形式で保存します。
//! 辞書ファイルを指定すると、各エントリが1語文として学習データに追加されます。

use std::error::Error;
use std::path::PathBuf;

use zhseg::trainer::Trainer;
use zhseg::{Corpus, Model};

use clap::Parser;

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "train", about = "Trains a CRF segmentation model")]
struct Args {
    /// Segmented corpus file (one sentence per line, whitespace-separated tokens).
    #[clap(short = 'i', long)]
    input: PathBuf,

    /// Dictionary whose entries are added as one-word training sentences.
    #[clap(short = 'd', long)]
    dict: Option<PathBuf>,

    /// Number of training iterations.
    #[clap(short = 'n', long, default_value = "5")]
    iterations: u64,

    /// Output model file.
    #[clap(short = 'o', long, default_value = "crf_model.txt")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the corpus...");
    let mut corpus = Corpus::from_path(&args.input)?;
    if let Some(dict) = &args.dict {
        corpus.append_dict_from_path(dict)?;
    }
    eprintln!("Loaded {} sentences.", corpus.len());

    let mut model = Model::new();
    for it in 1..=args.iterations {
        let stats = Trainer::run_iteration(&mut model, &corpus);
        eprintln!(
            "Iteration {}: accuracy {:.2}% ({}/{})",
            it,
            stats.accuracy() * 100.0,
            stats.correct,
            stats.total,
        );
    }

    model.save(&args.output)?;
    eprintln!(
        "Model with {} features saved to {}",
        model.num_features(),
        args.output.display()
    );

    Ok(())
}
