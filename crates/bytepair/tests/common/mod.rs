#![allow(missing_docs, dead_code)]
//! Checks against the published GPT-2 vocabulary, shared by the fixture tests.

use bytepair::Gpt2Tokenizer;

pub fn check_gpt2_vocabulary(tokenizer: &Gpt2Tokenizer<u32>) {
    let vocab = tokenizer.vocab();
    assert_eq!(vocab.len(), 50_257);
    assert_eq!(vocab.id_of("<|endoftext|>"), Some(50_256));
    assert_eq!(vocab.id_of("Hello"), Some(15_496));
    assert_eq!(vocab.id_of("Ġworld"), Some(995));
}

pub fn check_gpt2_encode(tokenizer: &Gpt2Tokenizer<u32>) {
    assert_eq!(tokenizer.encode("Hello world").unwrap(), vec![15_496, 995]);
    assert_eq!(tokenizer.encode("hello world").unwrap(), vec![31_373, 995]);
    assert_eq!(tokenizer.token_count("Hello world").unwrap(), 2);
    assert_eq!(tokenizer.decode(&[15_496, 995]).unwrap(), "Hello world");
}

pub fn check_gpt2_round_trip(tokenizer: &Gpt2Tokenizer<u32>) {
    for text in [
        "The quick brown fox jumps over the lazy dog.",
        "Don't forget: the temperature is 72 degrees!",
        "caf\u{00e9} na\u{00ef}ve \u{4f60}\u{597d}",
        "emoji: \u{1f600}\u{1f680}\u{1f4a1}",
        "line1\nline2\r\nline3   ",
    ] {
        let tokens = tokenizer.encode(text).unwrap();
        assert_eq!(tokenizer.token_count(text).unwrap(), tokens.len());
        assert_eq!(tokenizer.decode_strict(&tokens).unwrap(), text);
    }
}
