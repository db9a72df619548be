//! Built-in Bloom taxonomy tables.
//!
//! Used when the host process does not install its own tables. Order matters:
//! the first taxon seeds blank outcomes, and the first verb / assessment class /
//! instruction class of a taxon seeds new outcomes, plans and strategies.

pub(super) struct BuiltinTaxon {
    pub name: &'static str,
    pub verbs: &'static [&'static str],
    pub assessments: &'static [&'static str],
    pub instructions: &'static [&'static str],
}

pub(super) const TAXA: &[BuiltinTaxon] = &[
    BuiltinTaxon {
        name: "remember",
        verbs: &[
            "define", "describe", "identify", "label", "list", "locate", "match", "name",
            "recall", "recognize", "state",
        ],
        assessments: &["quiz", "multiple choice", "fill in the blank", "matching", "true/false"],
        instructions: &["lecture", "reading", "demonstration", "flash cards"],
    },
    BuiltinTaxon {
        name: "understand",
        verbs: &[
            "classify", "compare", "contrast", "discuss", "explain", "illustrate", "interpret",
            "paraphrase", "summarize",
        ],
        assessments: &["short answer", "essay", "concept map", "presentation"],
        instructions: &["lecture", "discussion", "case study", "demonstration"],
    },
    BuiltinTaxon {
        name: "apply",
        verbs: &[
            "apply", "calculate", "configure", "demonstrate", "execute", "implement", "install",
            "operate", "solve", "use",
        ],
        assessments: &["lab exercise", "practical", "simulation", "project"],
        instructions: &["lab", "hands-on exercise", "simulation", "demonstration"],
    },
    BuiltinTaxon {
        name: "analyze",
        verbs: &[
            "analyze", "categorize", "diagnose", "differentiate", "examine", "investigate",
            "test", "troubleshoot",
        ],
        assessments: &["case study analysis", "lab report", "research paper", "debate"],
        instructions: &["case study", "lab", "problem-based learning", "discussion"],
    },
    BuiltinTaxon {
        name: "evaluate",
        verbs: &[
            "appraise", "assess", "critique", "defend", "judge", "justify", "prioritize",
            "recommend", "validate",
        ],
        assessments: &["peer review", "critique", "debate", "portfolio"],
        instructions: &["seminar", "peer review", "debate", "case study"],
    },
    BuiltinTaxon {
        name: "create",
        verbs: &[
            "construct", "design", "develop", "formulate", "generate", "integrate", "plan",
            "produce",
        ],
        assessments: &["project", "design document", "portfolio", "capstone"],
        instructions: &["project-based learning", "workshop", "mentoring", "lab"],
    },
];

pub(super) const LENGTHS: &[&str] = &["nanomodule", "micromodule", "module", "unit", "course"];
