//! 分かち書きを実行するユーティリティ
//!
//! このバイナリは、引数または標準入力から読み込んだテキストを分かち書きし、
//! トークンを「 / 」で区切って標準出力に出力します。辞書はコア → ベース →
//! ユーザーの順に重ねて読み込まれ、後から読んだエントリが優先されます。

use std::error::Error;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use zhseg::{Dictionary, Mode, Model, Segmenter};

use clap::Parser;

/// 分割関数の選択
#[derive(Clone, Debug)]
enum Function {
    Cut,
    Search,
}

/// `Function` の `FromStr` 実装
impl FromStr for Function {
    type Err = &'static str;

    fn from_str(function: &str) -> Result<Self, Self::Err> {
        match function {
            "cut" => Ok(Self::Cut),
            "search" => Ok(Self::Search),
            _ => Err("Could not parse a function"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "segment", about = "Segments Chinese text into tokens")]
struct Args {
    /// Segmentation function. Choices are cut and search.
    #[clap(short = 'f', long, default_value = "cut")]
    function: Function,

    /// Algorithm mode. Choices are dag, crf, and hybrid.
    #[clap(short = 'm', long, default_value = "hybrid")]
    mode: Mode,

    /// Core dictionary.
    #[clap(long, default_value = "data/dict_core.txt")]
    core: PathBuf,

    /// Base dictionary.
    #[clap(long, default_value = "data/dict_base.txt")]
    base: PathBuf,

    /// User dictionary.
    #[clap(long, default_value = "data/dict_user.txt")]
    user: PathBuf,

    /// CRF model file.
    #[clap(long, default_value = "data/model.crf")]
    model: PathBuf,

    /// Texts to segment. Reads lines from stdin when empty.
    text: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // Hierarchical dictionaries: the last loaded entry wins.
    let mut dict = Dictionary::new();
    for path in [&args.core, &args.base, &args.user] {
        if path.is_file() {
            dict.load_from_path(path)?;
            eprintln!("Loaded dictionary: {}", path.display());
        }
    }
    if dict.is_empty() && args.mode != Mode::Crf {
        eprintln!("Warning: no dictionary loaded; DAG segmentation degrades to single characters.");
    }

    let mut segmenter = Segmenter::new(Arc::new(dict));
    if args.model.is_file() {
        let model = Model::from_path(&args.model)?;
        eprintln!(
            "Loaded CRF model with {} features: {}",
            model.num_features(),
            args.model.display()
        );
        segmenter = segmenter.with_model(Arc::new(model));
    } else if args.mode == Mode::Crf {
        return Err(format!(
            "CRF model file not found at {} (required for mode 'crf')",
            args.model.display()
        )
        .into());
    } else if args.mode == Mode::Hybrid {
        eprintln!(
            "Warning: CRF model not found at {}; downgrading 'hybrid' to DAG-only.",
            args.model.display()
        );
    }

    let process = |text: &str| match args.function {
        Function::Cut => segmenter.cut(text, args.mode),
        Function::Search => segmenter.cut_search(text, args.mode),
    };

    if !args.text.is_empty() {
        let text = args.text.join(" ");
        println!("{}", process(&text).join(" / "));
        return Ok(());
    }

    eprintln!("Ready to segment");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(&mut out, "{}", process(&line).join(" / "))?;
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}
