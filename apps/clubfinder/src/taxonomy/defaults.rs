//! Built-in taxonomy shipped with the popup.
//!
//! Tags here are the catalog's tag keys (lowercase, hyphenated).

use std::collections::BTreeMap;

use super::{
    AnswerOption, FlatQuestion, KeywordCategory, Leaf, Question, QuestionTree, QuizOption,
    SelectionKind, SideEffect, StepDefinition, Taxonomy, VisibilityRule,
};

pub const ROOT_STEP: &str = "gender";

const SOCIAL_GOAL: &str = "Social connection and community";
const LGBTQ_ANSWERS: &[&str] = &["LGBTQ+", "I don’t want to share"];

/// Resume keyword dictionary: (tag, group, keywords). Order is the tie-break order.
const KEYWORD_DICTIONARY: &[(&str, &str, &[&str])] = &[
    // Service & Leadership
    ("volunteering", "Service & Leadership", &["volunteer", "mobilized", "contributed", "championed", "altruism", "coordinated"]),
    ("advocacy", "Service & Leadership", &["represented", "campaigned", "lobbied", "grassroots", "navigated"]),
    ("mentorship", "Service & Leadership", &["mentor", "cultivated", "empowered", "coached", "advised", "fostered"]),
    ("greek-life", "Service & Leadership", &["organized", "presided", "recruited", "philanthropic", "liaison"]),
    // Technical & Analytical
    ("stem", "Technical & Analytical", &["science", "tech", "engineering", "math", "engineered", "validated", "optimized", "analytical", "systematic"]),
    ("computing", "Technical & Analytical", &["programmed", "deployed", "automated", "architecture", "debugging", "python", "java", "scripting"]),
    ("research", "Technical & Analytical", &["synthesized", "investigated", "quantified", "methodology", "published"]),
    ("design", "Technical & Analytical", &["conceptualized", "prototyped", "iterative", "visual", "user-centric", "art", "drawing", "sculpt"]),
    // Growth & Business
    ("professional-development", "Growth & Business", &["accelerated", "certified", "refined", "proactive", "specialized"]),
    ("business", "Growth & Business", &["scaled", "strategized", "negotiated", "profitability", "operations", "start up", "startup", "start-up", "entrepreneur", "pitch"]),
    ("skill-building", "Growth & Business", &["mastered", "executed", "streamlined", "proficient", "technical"]),
    ("health", "Growth & Business", &["rehabilitated", "assessed", "clinical", "wellness", "compliance", "medic", "anatomy"]),
    // Creative & Communication
    ("music", "Creative & Communication", &["composed", "performed", "collaborated", "technical", "disciplined", "music", "instrument", "vocal"]),
    ("performing-arts", "Creative & Communication", &["directed", "produced", "ensemble", "presence", "coordination", "preform", "story"]),
    ("media", "Creative & Communication", &["edited", "authored", "circulated", "digital", "storytelling"]),
    ("gaming", "Creative & Communication", &["strategic", "logic", "collaborative", "competitive", "troubleshooting"]),
    // Identity & Culture
    ("identity", "Identity & Culture", &["intersectionality", "advocacy", "authentic", "perspective", "awareness"]),
    ("identity-support", "Identity & Culture", &["facilitated", "inclusive", "outreach", "equitable", "safe-space"]),
    ("culture", "Identity & Culture", &["cross-cultural", "multilingual", "global", "heritage", "sensitivity"]),
    ("religion", "Identity & Culture", &["community", "ethics", "chaplaincy", "pastoral", "tradition"]),
];

pub fn builtin_taxonomy() -> Taxonomy {
    Taxonomy {
        tree: builtin_tree(),
        questionnaire: builtin_questionnaire(),
        keywords: builtin_keywords(),
    }
}

pub fn builtin_keywords() -> Vec<KeywordCategory> {
    KEYWORD_DICTIONARY
        .iter()
        .map(|(tag, group, keywords)| KeywordCategory {
            tag: tag.to_string(),
            group: Some(group.to_string()),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}

fn opt(label: &str, value: &str, next: &str) -> QuizOption {
    QuizOption {
        label: label.to_string(),
        value: value.to_string(),
        next: next.to_string(),
        tags: Vec::new(),
    }
}

/// Option whose value is also the leaf id it leads to.
fn leaf_opt(value: &str, label: &str) -> QuizOption {
    opt(label, value, value)
}

fn question(id: &str, title: &str, options: Vec<QuizOption>) -> (String, StepDefinition) {
    (
        id.to_string(),
        StepDefinition::Question(Question {
            id: id.to_string(),
            title: title.to_string(),
            options,
            on_select: None,
        }),
    )
}

fn leaf(id: &str, tags: &[&str]) -> (String, StepDefinition) {
    (
        id.to_string(),
        StepDefinition::Leaf(Leaf {
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }),
    )
}

pub fn builtin_tree() -> QuestionTree {
    let mut gender = question(
        ROOT_STEP,
        "Profiling: What is your gender?",
        vec![
            opt("Male", "Male", "motivation"),
            opt("Female", "Female", "motivation"),
            opt("LGBTQ+", "LGBTQ+", "identity-interest"),
            opt("I don’t want to share", "I don’t want to share", "identity-interest"),
        ],
    );
    if let StepDefinition::Question(q) = &mut gender.1 {
        q.on_select = Some(SideEffect::SetEligibility);
    }

    let mut wants_identity = opt("Yes", "yes", "motivation");
    wants_identity.tags = vec!["identity".to_string()];

    let steps: BTreeMap<String, StepDefinition> = [
        gender,
        question(
            "identity-interest",
            "Are you interested in LGBTQ+ clubs?",
            vec![wants_identity, opt("No", "no", "motivation")],
        ),
        question(
            "motivation",
            "What are you hoping to get out of joining a student organization?",
            vec![
                opt("Purpose and making an impact", "purpose", "purpose"),
                opt("Social connection and community", "social", "social"),
                opt("Personal growth or skill development", "growth", "growth"),
            ],
        ),
        question(
            "purpose",
            "What kind of purpose drives you?",
            vec![
                opt("Helping people directly", "impact", "impact"),
                leaf_opt("#20", "Speaking up for causes"),
                leaf_opt("#21", "Faith and spirituality"),
            ],
        ),
        question(
            "impact",
            "How would you most like to help?",
            vec![
                leaf_opt("#10", "Hands-on volunteering"),
                leaf_opt("#11", "Mentoring and tutoring"),
                leaf_opt("#12", "Health and wellness outreach"),
            ],
        ),
        question(
            "social",
            "How do you like to connect with people?",
            vec![
                leaf_opt("#30", "Greek life (like Alpha Epsilon Pi)"),
                opt("Through shared hobbies", "hobbies", "hobbies"),
                leaf_opt("#31", "Culture and heritage"),
            ],
        ),
        question(
            "hobbies",
            "What are your hobbies?",
            vec![
                leaf_opt("#40", "Music"),
                leaf_opt("#41", "Gaming (including boardgames like chess)"),
                leaf_opt("#42", "Performing Arts"),
                leaf_opt("#43", "Sports"),
                leaf_opt("#44", "Arts (non-performing)"),
            ],
        ),
        question(
            "growth",
            "What do you want to grow in?",
            vec![
                opt("Technology and science", "tech", "tech"),
                leaf_opt("#50", "Business and entrepreneurship"),
                leaf_opt("#51", "Career and professional skills"),
            ],
        ),
        question(
            "tech",
            "Which side of tech interests you?",
            vec![
                leaf_opt("#60", "Programming"),
                leaf_opt("#61", "Research"),
                leaf_opt("#62", "Design and digital media"),
                leaf_opt("#63", "Science and engineering"),
            ],
        ),
        leaf("#10", &["volunteering", "community"]),
        leaf("#11", &["mentorship", "volunteering"]),
        leaf("#12", &["health", "volunteering"]),
        leaf("#20", &["advocacy", "identity-support"]),
        leaf("#21", &["religion", "community"]),
        leaf("#30", &["greek-life", "community"]),
        leaf("#31", &["culture", "identity"]),
        leaf("#40", &["music"]),
        leaf("#41", &["gaming", "boardgame"]),
        leaf("#42", &["performing-arts"]),
        leaf("#43", &["sports", "running"]),
        leaf("#44", &["design", "art"]),
        leaf("#50", &["business", "professional-development"]),
        leaf("#51", &["professional-development", "skill-building"]),
        leaf("#60", &["computing", "stem"]),
        leaf("#61", &["research", "stem"]),
        leaf("#62", &["design", "media"]),
        leaf("#63", &["stem"]),
    ]
    .into_iter()
    .collect();

    QuestionTree {
        root: ROOT_STEP.to_string(),
        steps,
    }
}

fn answer(label: &str, tags: &[&str]) -> AnswerOption {
    AnswerOption {
        label: label.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn shown_when(question: &str, any_of: &[&str]) -> Option<VisibilityRule> {
    Some(VisibilityRule {
        question: question.to_string(),
        any_of: any_of.iter().map(|l| l.to_string()).collect(),
    })
}

pub fn builtin_questionnaire() -> Vec<FlatQuestion> {
    vec![
        FlatQuestion {
            id: "gender".to_string(),
            prompt: "Profiling: What is your Gender?".to_string(),
            kind: SelectionKind::Single,
            options: vec![
                answer("Male", &[]),
                answer("Female", &[]),
                answer("LGBTQ+", &[]),
                answer("I don’t want to share", &[]),
            ],
            visible_when: None,
            on_select: Some(SideEffect::SetEligibility),
        },
        FlatQuestion {
            id: "want_lgbtq".to_string(),
            prompt: "Are you interested in LGBTQ+ clubs?".to_string(),
            kind: SelectionKind::Single,
            options: vec![answer("Yes", &["identity"]), answer("No", &[])],
            visible_when: shown_when("gender", LGBTQ_ANSWERS),
            on_select: None,
        },
        FlatQuestion {
            id: "goal".to_string(),
            prompt: "What are you hoping to get out of joining a student organization? (Select all that apply)".to_string(),
            kind: SelectionKind::Multi,
            options: vec![
                answer(SOCIAL_GOAL, &["community"]),
                answer("Volunteering or making an impact", &["volunteering"]),
                answer(
                    "Personal growth or skill development",
                    &["skill-building", "professional-development"],
                ),
            ],
            visible_when: None,
            on_select: None,
        },
        FlatQuestion {
            id: "greek_life".to_string(),
            prompt: "Are you interested in Greek-Life clubs (like Alpha Epsilon Pi)?".to_string(),
            kind: SelectionKind::Single,
            options: vec![answer("Yes", &["greek-life"]), answer("No", &[])],
            visible_when: shown_when("goal", &[SOCIAL_GOAL]),
            on_select: None,
        },
        FlatQuestion {
            id: "hobby".to_string(),
            prompt: "What are your hobbies? (Select all that apply)".to_string(),
            kind: SelectionKind::Multi,
            options: vec![
                answer("Music", &["music"]),
                answer("Gaming (including boardgames like chess)", &["gaming", "boardgame"]),
                answer("Performing Arts", &["performing-arts"]),
                answer("Sports", &["sports"]),
                answer("Arts (non-performing)", &["design", "art"]),
            ],
            visible_when: shown_when("goal", &[SOCIAL_GOAL]),
            on_select: None,
        },
    ]
}
