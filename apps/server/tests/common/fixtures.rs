//! Test fixtures for vocabulary and voices.

use vocab_core::VoiceDescriptor;

/// Seven valid rows plus two malformed ones.
pub fn sample_csv() -> String {
    "No,Grammar,Category,Korean,English,Source
1,Noun,Food,사과,an apple,Unit 1
2,Noun,Food,배,a pear,Unit 1
3,Verb,Action,가다,to go,\"Unit 2, p.5\"
4,Verb,Action,먹다,to eat,Unit 2
5,Noun,Place,학교,school,Unit 3
broken row
6,Adjective,Feeling,행복하다,happy,Unit 4
7,Noun,Place,도서관,the library,Unit 3
8,Noun,Food,비어있음,,Unit 9
"
    .to_string()
}

/// CSV with a single valid row.
pub fn single_row_csv() -> String {
    "No,Grammar,Category,Korean,English,Source\n1,Noun,Food,사과,an apple,Unit 1\n".to_string()
}

pub fn voice(name: &str, lang_tag: &str) -> VoiceDescriptor {
    VoiceDescriptor {
        name: name.to_string(),
        lang_tag: lang_tag.to_string(),
        is_platform_default: false,
    }
}

pub fn installed_voices() -> Vec<VoiceDescriptor> {
    vec![
        voice("Alex", "en-US"),
        voice("Samantha", "en-US"),
        voice("Yuna (Enhanced)", "ko-KR"),
        voice("Jinho", "ko-KR"),
    ]
}
