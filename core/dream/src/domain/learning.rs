//! 学習センターの静的コンテンツ

/// 見出しと項目の並び
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearningSection {
    pub title: &'static str,
    pub items: &'static [&'static str],
}

pub const SECTIONS: &[LearningSection] = &[
    LearningSection {
        title: "STEPS TO LUCID DREAM",
        items: &[
            "1. Keep a dream journal and record dreams every morning",
            "2. Do reality checks throughout the day (e.g., look at your hands, check time)",
            "3. Practice meditation before bed to increase awareness",
            "4. Use the MILD technique (Mentally set intention to remember you're dreaming)",
            "5. Maintain a consistent sleep schedule",
            "6. When in a dream, stay calm to maintain lucidity",
            "7. Start with simple actions when you become lucid",
        ],
    },
    LearningSection {
        title: "TIPS FOR DREAM RECALL",
        items: &[
            "1. Keep a dream journal by your bed",
            "2. Write dreams immediately upon waking",
            "3. Get adequate sleep regularly",
            "4. Practice mindfulness before bed",
            "5. Review your dreams periodically",
        ],
    },
    LearningSection {
        title: "UNDERSTANDING DREAM TYPES",
        items: &[
            "• Lucid Dreams - Dreams where you're aware you're dreaming",
            "• Recurring Dreams - Dreams that repeat over time",
            "• Nightmares - Disturbing dreams that cause anxiety",
            "• Prophetic Dreams - Dreams that seem to predict events",
            "• Processing Dreams - Dreams that help process daily events",
        ],
    },
];
