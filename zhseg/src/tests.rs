//! エンドツーエンドのシナリオテスト
//!
//! 辞書・CRF・セグメンター・トレーナーを組み合わせた全体の動作を検証します。

use std::io::Write;
use std::sync::Arc;

use crate::crf::features::extract_features;
use crate::dictionary::OOV_LOG_PROB;
use crate::trainer::Trainer;
use crate::{Corpus, Dictionary, Mode, Model, Segmenter, Tag};

fn dict_from(entries: &[(&str, f64)], total: f64) -> Dictionary {
    let mut dict = Dictionary::new();
    for &(word, freq) in entries {
        dict.words.insert(word.to_string(), freq);
        dict.max_len = dict.max_len.max(word.chars().count());
    }
    dict.total = total;
    dict
}

#[test]
fn test_scenario_dag_known_words() {
    let dict = dict_from(
        &[
            ("南京市", 100.0),
            ("长江大桥", 100.0),
            ("南京", 10.0),
            ("市长", 10.0),
            ("长江", 10.0),
            ("大桥", 10.0),
            ("江", 5.0),
            ("大", 5.0),
            ("桥", 5.0),
        ],
        1000.0,
    );
    let segmenter = Segmenter::new(Arc::new(dict));

    assert_eq!(
        vec!["南京市", "长江大桥"],
        segmenter.cut("南京市长江大桥", Mode::Dag)
    );
    // Fully OOV input degrades to single characters.
    assert_eq!(
        vec!["我", "是", "程", "序", "员"],
        segmenter.cut("我是程序员", Mode::Dag)
    );
}

#[test]
fn test_scenario_search_expansion() {
    let dict = dict_from(
        &[
            ("南京市", 100.0),
            ("长江大桥", 100.0),
            ("南京", 10.0),
            ("市", 5.0),
            ("长江", 10.0),
            ("大桥", 10.0),
        ],
        1000.0,
    );
    let segmenter = Segmenter::new(Arc::new(dict));

    assert_eq!(
        vec!["南京", "市", "南京市", "长江", "大桥", "长江大桥"],
        segmenter.cut_search("南京市长江大桥", Mode::Dag)
    );
}

#[test]
fn test_scenario_crf_only() {
    let mut model = Model::new();
    model.update_transition(Tag::B, Tag::M, 10.0);
    model.update_transition(Tag::M, Tag::M, 10.0);
    model.update_transition(Tag::M, Tag::E, 10.0);
    model.update_emission("U02:长", Tag::B, 10.0);
    model.update_emission("U02:江", Tag::M, 10.0);
    model.update_emission("U02:大", Tag::M, 10.0);
    model.update_emission("U02:桥", Tag::E, 10.0);

    let segmenter = Segmenter::new(Arc::new(Dictionary::new())).with_model(Arc::new(model));
    assert_eq!(vec!["长江大桥"], segmenter.cut("长江大桥", Mode::Crf));
}

#[test]
fn test_scenario_crf_search_expansion() {
    let mut model = Model::new();
    model.update_transition(Tag::B, Tag::M, 10.0);
    model.update_transition(Tag::M, Tag::M, 10.0);
    model.update_transition(Tag::M, Tag::E, 10.0);
    model.update_emission("U02:长", Tag::B, 10.0);
    model.update_emission("U02:江", Tag::M, 10.0);
    model.update_emission("U02:大", Tag::M, 10.0);
    model.update_emission("U02:桥", Tag::E, 10.0);

    let dict = dict_from(&[("南京", 10.0), ("长江", 10.0), ("大桥", 10.0)], 30.0);
    let segmenter = Segmenter::new(Arc::new(dict)).with_model(Arc::new(model));

    assert_eq!(
        vec!["长江", "大桥", "长江大桥"],
        segmenter.cut_search("长江大桥", Mode::Crf)
    );
}

#[test]
fn test_scenario_log_probability() {
    let dict = dict_from(&[("A", 10.0), ("B", 90.0)], 100.0);
    assert!((dict.log_probability("A") - (-2.302585)).abs() < 1e-4);
    assert_eq!(OOV_LOG_PROB, dict.log_probability("Unknown"));
}

#[test]
fn test_scenario_model_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "T B E 10.5").unwrap();
    writeln!(file, "F U00:我 S 5.0").unwrap();
    file.flush().unwrap();

    let model = Model::from_path(file.path()).unwrap();
    assert_eq!(10.5, model.transition(Tag::B, Tag::E));
    assert_eq!(5.0, model.emission("U00:我", Tag::S));

    let out = tempfile::NamedTempFile::new().unwrap();
    model.save(out.path()).unwrap();
    let reloaded = Model::from_path(out.path()).unwrap();
    assert_eq!(model, reloaded);
}

#[test]
fn test_dictionary_file_layering() {
    let mut core = tempfile::NamedTempFile::new().unwrap();
    writeln!(core, "南京 10").unwrap();
    writeln!(core, "大桥 20").unwrap();
    core.flush().unwrap();

    let mut user = tempfile::NamedTempFile::new().unwrap();
    writeln!(user, "南京 50").unwrap();
    user.flush().unwrap();

    let mut dict = Dictionary::new();
    dict.load_from_path(core.path()).unwrap();
    dict.load_from_path(user.path()).unwrap();

    assert_eq!(Some(50.0), dict.frequency("南京"));
    assert_eq!(80.0, dict.total());
    assert_eq!(2, dict.max_len());
}

#[test]
fn test_feature_window_property() {
    let runes: Vec<char> = "南京市长江大桥".chars().collect();
    for i in 0..runes.len() {
        let feats = extract_features(&runes, i);
        assert_eq!(5, feats.len());
        for (feat, template) in feats.iter().zip(["U00", "U01", "U02", "U03", "U04"]) {
            assert!(feat.starts_with(template));
        }
    }
    assert!(extract_features(&runes, 0)[0].ends_with("_BOS_"));
    assert!(extract_features(&runes, runes.len() - 1)[4].ends_with("_BOS_"));
}

#[test]
fn test_cut_is_lossless_across_modes() {
    let dict = dict_from(
        &[("南京市", 100.0), ("长江", 10.0), ("大桥", 10.0)],
        500.0,
    );
    let mut model = Model::new();
    model.update_emission("U02:我", Tag::S, 5.0);
    let segmenter = Segmenter::new(Arc::new(dict)).with_model(Arc::new(model));

    let inputs = [
        "南京市长江大桥",
        "我是程序员，住7天优品酒店。",
        "PKU is 北京大学",
        "",
    ];
    for text in inputs {
        for mode in [Mode::Dag, Mode::Crf, Mode::Hybrid] {
            let tokens = segmenter.cut(text, mode);
            assert_eq!(text, tokens.concat(), "mode {:?}", mode);
        }
    }
}

#[test]
fn test_alphanumeric_runs_are_never_split() {
    let dict = dict_from(&[("酒店", 10.0)], 10.0);
    let mut model = Model::new();
    model.update_emission("U02:店", Tag::S, 1.0);
    let segmenter = Segmenter::new(Arc::new(dict)).with_model(Arc::new(model));

    // The DAG fast path protects runs embedded in a Chinese block, and the
    // hybrid controller trusts the resulting tokens.
    for mode in [Mode::Dag, Mode::Hybrid] {
        for run in ["7", "25", "PKU", "A380"] {
            let text = format!("住{}酒店", run);
            let tokens = segmenter.cut(&text, mode);
            assert!(
                tokens.contains(&run.to_string()),
                "mode {:?}: {:?} must contain {:?}",
                mode,
                tokens,
                run
            );
        }
    }

    // A run separated by non-word characters forms a pure block and passes
    // through verbatim in every mode.
    for mode in [Mode::Dag, Mode::Crf, Mode::Hybrid] {
        for run in ["25", "PKU"] {
            let text = format!("住 {} 酒店", run);
            let tokens = segmenter.cut(&text, mode);
            assert!(tokens.contains(&run.to_string()));
        }
    }
}

#[test]
fn test_dag_multi_char_tokens_are_dictionary_words() {
    let dict = dict_from(
        &[("南京市", 100.0), ("长江", 10.0), ("大桥", 10.0)],
        500.0,
    );
    let dict = Arc::new(dict);
    let segmenter = Segmenter::new(dict.clone());

    for tokens in [
        segmenter.cut("南京市长江大桥", Mode::Dag),
        segmenter.cut("我们住在南京市", Mode::Dag),
    ] {
        for token in tokens {
            let is_alnum_run = token.chars().all(|c| c.is_ascii_alphanumeric());
            if token.chars().count() > 1 && !is_alnum_run {
                assert!(dict.contains(&token), "{} must be a dictionary word", token);
            }
        }
    }
}

#[test]
fn test_train_then_segment_end_to_end() {
    let corpus_text = "\
我们 是 程序员
丽怡 酒店
茂名 高铁站
武汉 汉口 火车站
南京市 长江大桥
";
    let corpus = Corpus::from_reader(corpus_text.as_bytes()).unwrap();
    let result = Trainer::new().max_iter(20).train(&corpus);
    assert_eq!(
        result.history.last().unwrap().correct,
        result.history.last().unwrap().total
    );

    // Persist the trained weights and decode with the reloaded model.
    let file = tempfile::NamedTempFile::new().unwrap();
    result.model.save(file.path()).unwrap();
    let model = Model::from_path(file.path()).unwrap();

    let segmenter = Segmenter::new(Arc::new(Dictionary::new())).with_model(Arc::new(model));
    assert_eq!(
        vec!["武汉", "汉口", "火车站"],
        segmenter.cut("武汉汉口火车站", Mode::Crf)
    );
    assert_eq!(
        vec!["南京市", "长江大桥"],
        segmenter.cut("南京市长江大桥", Mode::Crf)
    );
}
