//! Built-in trigger phrase tables
//!
//! Groups marked `strict_only` carry the high-recall vocabulary (bare
//! demographic nouns, everyday words with a biased reading) that is only
//! scanned under [`PolicyProfile::Strict`](crate::config::PolicyProfile).

use shared_types::{BiasType, Severity};

use super::{Lexicon, PhraseGroup};
use crate::context::{
    ContextRule, COMPENSATION_TERMS, GEOGRAPHIC_NOUNS, HIRING_TERMS, YOUTH_NEUTRAL_TERMS,
};

const GENDERED_LANGUAGE: &str =
    "'{word}' is gendered language. Use gender-neutral alternatives instead.";
const GENDER_STEREOTYPE: &str =
    "'{word}' may reinforce gender stereotypes associated with {subcategory}";
const RACE: &str = "'{word}' is a problematic term that may perpetuate racial stereotypes";
const DISABILITY: &str =
    "'{word}' is ableist language that can be harmful to people with disabilities";
const CULTURE: &str = "'{word}' may reflect cultural bias or ethnocentrism";
const POLITICAL: &str = "'{word}' indicates political or ideological bias";
const RELIGION: &str = "'{word}' may reflect religious bias or discrimination";
const LGBTQ: &str = "'{word}' is problematic language regarding LGBTQ+ individuals";
const SOCIOECONOMIC: &str = "'{word}' may reflect class-based bias or assumptions";
const TRUTH: &str = "'{word}' may indicate unsubstantiated claims or overgeneralizations";
const NEUTRALITY: &str = "'{word}' indicates non-neutral framing or ideological bias";

pub(super) fn build() -> Lexicon {
    let mut lexicon = Lexicon::new();
    gender(&mut lexicon);
    race(&mut lexicon);
    age(&mut lexicon);
    disability(&mut lexicon);
    culture(&mut lexicon);
    political(&mut lexicon);
    religion(&mut lexicon);
    lgbtq(&mut lexicon);
    socioeconomic(&mut lexicon);
    truth_seeking(&mut lexicon);
    ideological_neutrality(&mut lexicon);
    language_tone(&mut lexicon);
    lexicon
}

fn gender(lexicon: &mut Lexicon) {
    let personality_context = ContextRule::suppress_near(COMPENSATION_TERMS);

    lexicon
        .add_group(
            BiasType::Gender,
            PhraseGroup::new(
                "gendered_titles",
                Severity::High,
                GENDERED_LANGUAGE,
                &[
                    "chairman", "chairwoman", "salesman", "salesmen", "saleswoman", "saleswomen",
                    "policeman", "policemen", "policewoman", "policewomen", "fireman", "firemen",
                    "firewoman", "firewomen", "businessman", "businessmen", "businesswoman",
                    "businesswomen", "congressman", "congressmen", "congresswoman",
                    "congresswomen", "spokesman", "spokesmen", "spokeswoman", "spokeswomen",
                    "mailman", "mailmen", "postman", "postmen", "stewardess", "waitress",
                    "actress", "workman", "workmen", "foreman", "foremen", "anchorman",
                    "anchormen", "anchorwoman", "anchorwomen", "cameraman", "cameramen",
                ],
            ),
        )
        .add_group(
            BiasType::Gender,
            PhraseGroup::new(
                "gendered_terms",
                Severity::High,
                GENDERED_LANGUAGE,
                &[
                    "manpower", "mankind", "man-made", "manmade", "man hours", "man-hours",
                    "guy", "guys",
                ],
            ),
        )
        .add_group(
            BiasType::Gender,
            PhraseGroup::new(
                "male_stereotypes",
                Severity::Medium,
                GENDER_STEREOTYPE,
                &[
                    "aggressive", "dominant", "assertive", "competitive", "ambitious", "decisive",
                    "analytical", "logical", "independent", "confident", "strong", "tough",
                    "arrogant", "charismatic", "leader", "genius", "brilliant", "mastermind",
                ],
            )
            .with_context(personality_context.clone()),
        )
        .add_group(
            BiasType::Gender,
            PhraseGroup::new(
                "female_stereotypes",
                Severity::Medium,
                GENDER_STEREOTYPE,
                &[
                    "nurturing", "supportive", "emotional", "sensitive", "caring", "empathetic",
                    "collaborative", "warm", "gentle", "sympathetic", "compassionate", "sweet",
                    "bubbly", "ditzy", "bossy", "shrill", "hysterical", "dramatic", "catty",
                ],
            )
            .with_context(personality_context),
        )
        .add_group(
            BiasType::Gender,
            PhraseGroup::new(
                "generic_nouns",
                Severity::High,
                "'{word}' singles out gender; check whether it is relevant here",
                &[
                    "man", "men", "woman", "women", "male", "female", "boy", "girl", "steward",
                    "waiter", "actor",
                ],
            )
            .strict_only(),
        );
}

fn race(lexicon: &mut Lexicon) {
    lexicon
        .add_group(
            BiasType::Race,
            PhraseGroup::new(
                "problematic",
                Severity::High,
                RACE,
                &[
                    "exotic", "articulate", "inner-city", "ghetto", "thug", "oriental",
                    "primitive", "tribal", "uncivilized", "savage", "well-spoken", "eloquent",
                    "clean-cut", "uppity", "colored", "negro", "illegal alien",
                    "illegal immigrant", "illegals", "foreigner", "foreign-looking",
                    "un-american", "go back to", "you people", "culturally backward",
                    "third world",
                ],
            ),
        )
        .add_group(
            BiasType::Race,
            PhraseGroup::new(
                "stereotypes",
                Severity::High,
                RACE,
                &[
                    "naturally good at math", "good at math", "bad drivers", "poor drivers",
                    "super predator", "welfare queen", "anchor baby", "model minority",
                    "lazy mexicans", "criminal blacks", "terrorist arabs", "sneaky asians",
                    "all asians", "all blacks", "all whites", "all hispanics", "all latinos",
                    "blacks are", "asians are", "whites are", "hispanics are", "latinos are",
                ],
            ),
        )
        .add_group(
            BiasType::Race,
            PhraseGroup::new(
                "coded_language",
                Severity::High,
                RACE,
                &[
                    "urban youth", "inner city youth", "gang member", "gangbanger", "hood rat",
                    "welfare recipient", "diversity hire", "quota hire",
                    "affirmative action hire",
                ],
            ),
        )
        .add_group(
            BiasType::Race,
            PhraseGroup::new(
                "coded_places",
                Severity::High,
                RACE,
                &["urban", "aliens", "those people", "chicago", "detroit", "baltimore"],
            )
            .strict_only(),
        );
}

fn age(lexicon: &mut Lexicon) {
    lexicon
        .add_group(
            BiasType::Age,
            PhraseGroup::new(
                "youth_coded",
                Severity::Medium,
                "'{word}' may signal a preference for younger candidates",
                &[
                    "young", "energetic", "innovative", "tech-savvy", "fresh", "dynamic",
                    "passionate", "digital native", "recent graduate",
                ],
            )
            .with_context(ContextRule::require_near(HIRING_TERMS, YOUTH_NEUTRAL_TERMS)),
        )
        .add_group(
            BiasType::Age,
            PhraseGroup::new(
                "youth_stereotypes",
                Severity::Medium,
                "'{word}' may reflect age-based assumptions about younger people",
                &["lazy millennial", "snowflake generation", "kids these days"],
            ),
        )
        .add_group(
            BiasType::Age,
            PhraseGroup::new(
                "older",
                Severity::Medium,
                "'{word}' may reflect age-based assumptions about older people",
                &[
                    "old-fashioned", "outdated", "resistant to change", "set in their ways",
                    "elderly worker", "senior moment", "retirement age", "dinosaur", "too old",
                    "over the hill", "past their prime", "geriatric",
                ],
            ),
        )
        .add_group(
            BiasType::Age,
            PhraseGroup::new(
                "older_ambiguous",
                Severity::Medium,
                "'{word}' may reflect age-based assumptions about older people",
                &[
                    "experienced", "traditional", "slow", "ancient", "elderly", "senior",
                    "retirement",
                ],
            )
            .strict_only(),
        );
}

fn disability(lexicon: &mut Lexicon) {
    lexicon.add_group(
        BiasType::Disability,
        PhraseGroup::new(
            "ableist",
            Severity::High,
            DISABILITY,
            &[
                "crazy", "insane", "psycho", "lame", "dumb", "blind to", "deaf to", "crippled",
                "handicapped", "retarded", "stupid", "idiotic", "moronic", "wheelchair-bound",
                "confined to a wheelchair", "suffers from", "victim of",
            ],
        ),
    );
}

fn culture(lexicon: &mut Lexicon) {
    lexicon
        .add_group(
            BiasType::Culture,
            PhraseGroup::new(
                "western_centric",
                Severity::Medium,
                CULTURE,
                &[
                    "exotic", "third world", "primitive", "backwards", "civilized", "oriental",
                    "tribal", "traditional dress",
                ],
            ),
        )
        .add_group(
            BiasType::Culture,
            PhraseGroup::new(
                "developing_world",
                Severity::Medium,
                CULTURE,
                &["developing", "underdeveloped"],
            )
            .with_context(ContextRule::require_followed_by(GEOGRAPHIC_NOUNS)),
        )
        .add_group(
            BiasType::Culture,
            PhraseGroup::new(
                "ambiguous",
                Severity::Medium,
                CULTURE,
                &["normal", "foreign", "alien", "native"],
            )
            .strict_only(),
        );
}

fn political(lexicon: &mut Lexicon) {
    lexicon
        .add_group(
            BiasType::Political,
            PhraseGroup::new(
                "partisan",
                Severity::Medium,
                POLITICAL,
                &[
                    "woke", "snowflake", "libtard", "liberal agenda", "far-left", "far-right",
                    "radical left", "alt-right", "social justice warrior", "sjw",
                    "politically correct", "virtue signaling", "cancel culture",
                    "indoctrination", "brainwashed", "sheeple", "fake news", "mainstream media",
                    "deep state", "socialist agenda",
                ],
            ),
        )
        .add_group(
            BiasType::Political,
            PhraseGroup::new(
                "extremist_labels",
                Severity::Medium,
                POLITICAL,
                &[
                    "libtards", "conservatards", "trumptards", "democrats want",
                    "republicans want", "liberals are", "conservatives are",
                    "the left wants to destroy", "right-wing extremist", "left-wing extremist",
                    "communist plot", "socialist takeover", "fascist", "nazi", "marxist",
                    "domestic terrorist",
                ],
            ),
        )
        .add_group(
            BiasType::Political,
            PhraseGroup::new(
                "partisan_framing",
                Severity::Medium,
                POLITICAL,
                &[
                    "radical left agenda", "conservative patriots", "liberal elite",
                    "maga patriots", "antifa thugs", "proud boys", "woke mob",
                    "liberal media bias", "conservative propaganda", "leftist narrative",
                ],
            ),
        )
        .add_group(
            BiasType::Political,
            PhraseGroup::new(
                "ideological",
                Severity::Medium,
                POLITICAL,
                &[
                    "obviously", "clearly", "everyone knows", "common sense", "natural law",
                    "traditional values", "family values", "real american", "patriotic",
                    "conservative", "communist",
                ],
            )
            .strict_only(),
        );
}

fn religion(lexicon: &mut Lexicon) {
    lexicon
        .add_group(
            BiasType::Religion,
            PhraseGroup::new(
                "problematic",
                Severity::High,
                RELIGION,
                &[
                    "infidel", "heathen", "godless", "pagan", "cult", "radical islam",
                    "fundamentalist", "extremist", "judeo-christian", "christian nation",
                    "backwards religion", "primitive beliefs", "superstitious", "jihadist",
                    "crusade", "holy war", "religious fanatic",
                ],
            ),
        )
        .add_group(
            BiasType::Religion,
            PhraseGroup::new(
                "stereotypes",
                Severity::High,
                RELIGION,
                &[
                    "all muslims", "all christians", "all jews", "all hindus", "all buddhists",
                    "all atheists", "muslims are", "christians are", "jews are", "hindus are",
                    "atheists are", "islamist", "terrorist religion", "false prophet",
                    "muslim extremist", "islamic terrorist", "christian fanatic",
                    "jewish conspiracy",
                ],
            ),
        )
        .add_group(
            BiasType::Religion,
            PhraseGroup::new(
                "discriminatory",
                Severity::High,
                RELIGION,
                &[
                    "sharia law", "jihad", "muslim ban", "christianize", "islamization",
                    "religious indoctrination", "brainwashed by religion", "religion of peace",
                    "crusader", "zionist conspiracy", "atheist agenda", "godless communists",
                    "immoral atheists", "heathen practices", "pagan rituals", "devil worship",
                ],
            ),
        )
        .add_group(
            BiasType::Religion,
            PhraseGroup::new(
                "group_nouns",
                Severity::High,
                RELIGION,
                &[
                    "muslim", "muslims", "christian", "christians", "jew", "jews", "hindu",
                    "hindus", "buddhist", "buddhists", "atheist", "atheists",
                ],
            )
            .strict_only(),
        );
}

fn lgbtq(lexicon: &mut Lexicon) {
    lexicon
        .add_group(
            BiasType::Lgbtq,
            PhraseGroup::new(
                "problematic",
                Severity::High,
                LGBTQ,
                &[
                    "lifestyle choice", "sexual preference", "homosexual agenda",
                    "gay lifestyle", "unnatural", "real man", "real woman", "born male",
                    "born female", "biological male", "biological female", "transvestite",
                    "transsexual", "hermaphrodite", "deviant", "perversion",
                ],
            ),
        )
        .add_group(
            BiasType::Lgbtq,
            PhraseGroup::new(
                "ambiguous",
                Severity::High,
                LGBTQ,
                &["normal", "traditional family", "cross-dresser", "lifestyle", "confused"],
            )
            .strict_only(),
        );
}

fn socioeconomic(lexicon: &mut Lexicon) {
    lexicon
        .add_group(
            BiasType::Socioeconomic,
            PhraseGroup::new(
                "class_based",
                Severity::Medium,
                SOCIOECONOMIC,
                &[
                    "low class", "welfare queen", "trailer trash", "ghetto", "poor people",
                    "uneducated", "trust fund baby", "silver spoon", "lazy poor",
                ],
            ),
        )
        .add_group(
            BiasType::Socioeconomic,
            PhraseGroup::new(
                "stereotypes",
                Severity::Medium,
                SOCIOECONOMIC,
                &[
                    "poor people are lazy", "poor are lazy", "rich deserve", "wealthy deserve",
                    "poverty is a choice", "just work harder", "pull yourself up", "bootstraps",
                    "freeloader", "moocher", "welfare dependent", "living off government",
                    "government cheese",
                ],
            ),
        )
        .add_group(
            BiasType::Socioeconomic,
            PhraseGroup::new(
                "dehumanizing",
                Severity::Medium,
                SOCIOECONOMIC,
                &[
                    "low-income people", "the poors", "peasant", "pleb", "redneck",
                    "white trash", "hillbilly", "country bumpkin", "unwashed masses",
                    "social climber",
                ],
            ),
        )
        .add_group(
            BiasType::Socioeconomic,
            PhraseGroup::new(
                "ambiguous",
                Severity::Medium,
                SOCIOECONOMIC,
                &[
                    "hood", "inner-city", "underprivileged", "disadvantaged", "less fortunate",
                    "blue collar", "working class", "elitist", "privileged", "entitled",
                    "handout", "taker", "nouveau riche", "old money", "new money",
                ],
            )
            .strict_only(),
        );
}

fn truth_seeking(lexicon: &mut Lexicon) {
    lexicon
        .add_group(
            BiasType::TruthSeeking,
            PhraseGroup::new(
                "unsubstantiated",
                Severity::Medium,
                TRUTH,
                &[
                    "it's a fact that", "undeniable truth", "without a doubt", "proven fact",
                    "experts all agree", "scientists all agree", "the truth is",
                    "impossible to deny", "irrefutable fact", "indisputable fact",
                    "beyond question", "absolute truth", "undeniable fact",
                ],
            ),
        )
        .add_group(
            BiasType::TruthSeeking,
            PhraseGroup::new(
                "overgeneralization",
                Severity::Medium,
                TRUTH,
                &[
                    "always wrong", "never works", "nobody believes", "100% guaranteed",
                    "completely impossible", "totally false", "entirely untrue",
                    "perfectly clear that", "obviously true", "obviously false",
                ],
            ),
        )
        // Claims are frequently quoted or punctuated, so they match anywhere
        .add_group(
            BiasType::TruthSeeking,
            PhraseGroup::new(
                "misinformation_claims",
                Severity::Medium,
                TRUTH,
                &[
                    "vaccines cause autism", "climate change is a hoax", "climate hoax",
                    "climate change is a complete hoax", "climate change hoax",
                    "global warming is a hoax", "global warming hoax", "flat earth",
                    "moon landing was faked", "5g causes cancer", "covid is a hoax",
                    "covid hoax", "microchips in vaccines", "covid vaccine kills",
                    "election was stolen", "stolen election", "deep state conspiracy", "qanon",
                    "chemtrails", "fluoride mind control", "reptilian", "illuminati controls",
                ],
            )
            .substring(),
        )
        .add_group(
            BiasType::TruthSeeking,
            PhraseGroup::new(
                "conspiracy_language",
                Severity::Medium,
                TRUTH,
                &[
                    "wake up sheeple", "they don't want you to know", "the truth they hide",
                    "mainstream media lies", "fake science", "government coverup",
                    "big pharma conspiracy", "follow the money", "do your own research",
                    "question everything", "don't trust the science", "alternative facts",
                ],
            ),
        );
}

fn ideological_neutrality(lexicon: &mut Lexicon) {
    lexicon
        .add_group(
            BiasType::IdeologicalNeutrality,
            PhraseGroup::new(
                "non_neutral_framing",
                Severity::Medium,
                NEUTRALITY,
                &[
                    "the establishment", "the elite", "big tech", "big pharma",
                    "globalist agenda", "controlled opposition", "power structure",
                    "ruling class",
                ],
            ),
        )
        .add_group(
            BiasType::IdeologicalNeutrality,
            PhraseGroup::new(
                "dismissive_framing",
                Severity::Medium,
                NEUTRALITY,
                &[
                    "so-called experts", "so-called science", "official narrative",
                    "they want you to believe", "they're lying to you", "don't be fooled",
                    "wake up people", "open your eyes people", "do your own research",
                    "question everything they say",
                ],
            ),
        )
        .add_group(
            BiasType::IdeologicalNeutrality,
            PhraseGroup::new(
                "absolutist_framing",
                Severity::Medium,
                NEUTRALITY,
                &[
                    "the only solution", "the real problem", "what's really happening",
                    "the real agenda", "the hidden truth", "what they won't tell you",
                    "the actual facts", "the only answer",
                ],
            ),
        )
        .add_group(
            BiasType::IdeologicalNeutrality,
            PhraseGroup::new("ambiguous", Severity::Medium, NEUTRALITY, &["the system"])
                .strict_only(),
        );
}

/// Order matters: the language-tone detector claims positions group by
/// group, so earlier groups win a shared position.
fn language_tone(lexicon: &mut Lexicon) {
    lexicon
        .add_group(
            BiasType::LanguageTone,
            PhraseGroup::new(
                "slurs",
                Severity::High,
                "Contains prohibited slur: '{word}'",
                &[
                    "retard", "retarded", "nigger", "faggot", "tranny", "cunt", "whore", "slut",
                    "bitch", "bastard", "asshole",
                ],
            ),
        )
        .add_group(
            BiasType::LanguageTone,
            PhraseGroup::new(
                "profanity",
                Severity::Medium,
                "Contains profanity: '{word}'",
                &[
                    "fuck", "fucking", "fucked", "shit", "shitty", "damn", "hell", "ass", "dick",
                    "piss", "cock", "pussy", "bollocks", "bloody hell",
                ],
            ),
        )
        .add_group(
            BiasType::LanguageTone,
            PhraseGroup::new(
                "hate_speech",
                Severity::High,
                "Contains hate speech: '{word}'",
                &[
                    "kill yourself", "go to hell", "kys", "subhuman", "inferior race",
                    "master race", "race war", "ethnic cleansing",
                ],
            ),
        )
        .add_group(
            BiasType::LanguageTone,
            PhraseGroup::new(
                "hate_speech_ambiguous",
                Severity::High,
                "Contains hate speech: '{word}'",
                &["die"],
            )
            .strict_only(),
        )
        .add_group(
            BiasType::LanguageTone,
            PhraseGroup::new(
                "unprofessional",
                Severity::Low,
                "Unprofessional tone detected: '{word}'",
                &[
                    "sucks", "crap", "crappy", "pissed off", "screwed up", "messed up",
                    "bullcrap", "idiotic", "moronic", "stupid",
                ],
            ),
        );
}
