//! Practice syllables: one base syllable in each of its four tones.

use serde::Serialize;

use super::Tone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToneVariant {
    pub tone: Tone,
    pub pinyin: &'static str,
    pub hanzi: &'static str,
    pub gloss: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToneSyllable {
    pub base: &'static str,
    pub variants: [ToneVariant; 4],
}

impl ToneSyllable {
    pub fn variant(&self, tone: Tone) -> &ToneVariant {
        &self.variants[usize::from(tone.number() - 1)]
    }
}

type Entry = (&'static str, &'static str, &'static str);

const fn syllable(base: &'static str, variants: [Entry; 4]) -> ToneSyllable {
    ToneSyllable {
        base,
        variants: [
            variant(Tone::First, variants[0]),
            variant(Tone::Second, variants[1]),
            variant(Tone::Third, variants[2]),
            variant(Tone::Fourth, variants[3]),
        ],
    }
}

const fn variant(tone: Tone, entry: Entry) -> ToneVariant {
    ToneVariant {
        tone,
        pinyin: entry.0,
        hanzi: entry.1,
        gloss: entry.2,
    }
}

pub static SYLLABLES: [ToneSyllable; 15] = [
    syllable(
        "ma",
        [
            ("mā", "妈", "mother"),
            ("má", "麻", "hemp"),
            ("mǎ", "马", "horse"),
            ("mà", "骂", "to scold"),
        ],
    ),
    syllable(
        "ba",
        [
            ("bā", "八", "eight"),
            ("bá", "拔", "to pull out"),
            ("bǎ", "把", "to hold"),
            ("bà", "爸", "father"),
        ],
    ),
    syllable(
        "da",
        [
            ("dā", "搭", "to build"),
            ("dá", "达", "to reach"),
            ("dǎ", "打", "to hit"),
            ("dà", "大", "big"),
        ],
    ),
    syllable(
        "shi",
        [
            ("shī", "师", "teacher"),
            ("shí", "十", "ten"),
            ("shǐ", "史", "history"),
            ("shì", "是", "to be"),
        ],
    ),
    syllable(
        "si",
        [
            ("sī", "丝", "silk"),
            ("sí", "死", "to die (rising)"),
            ("sǐ", "死", "to die"),
            ("sì", "四", "four"),
        ],
    ),
    syllable(
        "li",
        [
            ("lī", "哩", "mile"),
            ("lí", "离", "to leave"),
            ("lǐ", "里", "inside"),
            ("lì", "力", "strength"),
        ],
    ),
    syllable(
        "fu",
        [
            ("fū", "夫", "husband"),
            ("fú", "福", "fortune"),
            ("fǔ", "府", "mansion"),
            ("fù", "父", "father"),
        ],
    ),
    syllable(
        "gu",
        [
            ("gū", "姑", "aunt"),
            ("gú", "骨", "bone (rising)"),
            ("gǔ", "古", "ancient"),
            ("gù", "故", "reason"),
        ],
    ),
    syllable(
        "zhu",
        [
            ("zhū", "猪", "pig"),
            ("zhú", "竹", "bamboo"),
            ("zhǔ", "主", "main"),
            ("zhù", "住", "to live"),
        ],
    ),
    syllable(
        "chi",
        [
            ("chī", "吃", "to eat"),
            ("chí", "池", "pool"),
            ("chǐ", "尺", "ruler"),
            ("chì", "赤", "red"),
        ],
    ),
    syllable(
        "du",
        [
            ("dū", "都", "capital"),
            ("dú", "读", "to read"),
            ("dǔ", "赌", "to gamble"),
            ("dù", "度", "degree"),
        ],
    ),
    syllable(
        "tang",
        [
            ("tāng", "汤", "soup"),
            ("táng", "糖", "sugar"),
            ("tǎng", "躺", "to lie down"),
            ("tàng", "趟", "trip"),
        ],
    ),
    syllable(
        "wen",
        [
            ("wēn", "温", "warm"),
            ("wén", "文", "writing"),
            ("wěn", "稳", "stable"),
            ("wèn", "问", "to ask"),
        ],
    ),
    syllable(
        "kai",
        [
            ("kāi", "开", "to open"),
            ("kái", "揩", "to wipe"),
            ("kǎi", "凯", "triumph"),
            ("kài", "慨", "generous"),
        ],
    ),
    syllable(
        "tian",
        [
            ("tiān", "天", "sky"),
            ("tián", "甜", "sweet"),
            ("tiǎn", "舔", "to lick"),
            ("tiàn", "殿", "hall"),
        ],
    ),
];

/// Look up a practice syllable by its toneless base, e.g. `"ma"`.
pub fn find_syllable(base: &str) -> Option<&'static ToneSyllable> {
    let base = base.trim().to_lowercase();
    SYLLABLES.iter().find(|syllable| syllable.base == base)
}

/// Look up a tone variant by its marked pinyin, e.g. `"mǎ"`.
pub fn find_variant(pinyin: &str) -> Option<&'static ToneVariant> {
    let pinyin = pinyin.trim().to_lowercase();
    SYLLABLES
        .iter()
        .flat_map(|syllable| syllable.variants.iter())
        .find(|variant| variant.pinyin == pinyin)
}
