//! Static health-advice content shown on the advice screen.

/// One advice topic: a tile with a short summary and a longer detail text.
#[derive(Clone, Copy, Debug)]
pub struct AdviceSection {
    pub title: &'static str,
    pub summary: &'static str,
    pub body: &'static str,
}

/// All advice topics, in display order.
pub fn sections() -> &'static [AdviceSection] {
    SECTIONS
}

const SECTIONS: &[AdviceSection] = &[
    AdviceSection {
        title: "General Advice",
        summary: "Learn about healthy eating, exercise, and more.",
        body: "Diet tips: healthy eating advice, what to avoid, and the importance of \
               balanced meals. Exercise: recommended physical activities and tips for \
               maintaining an active lifestyle.",
    },
    AdviceSection {
        title: "Prevention Tips",
        summary: "Lifestyle changes to lower your risk.",
        body: "Practical advice for those at risk of developing diabetes, focusing on \
               lifestyle changes that can help prevent it.",
    },
    AdviceSection {
        title: "When to Seek Help",
        summary: "Know the warning signs.",
        body: "Warning signs to look for that may require seeing a healthcare \
               professional, such as unusual thirst, frequent urination, or blurred \
               vision.",
    },
    AdviceSection {
        title: "Managing Diabetes",
        summary: "Advice for Type 1 and Type 2 diabetes.",
        body: "Tailored advice for individuals with Type 1 and Type 2 diabetes. Support \
               resources and how to manage diabetes as a newly diagnosed patient, or for \
               those who have been managing it for years.",
    },
    AdviceSection {
        title: "Interactive FAQs",
        summary: "Answers to common questions.",
        body: "Common questions and answers about diabetes, such as \"What are the \
               long-term effects?\" or \"How do I manage diabetes when I'm sick?\"",
    },
    AdviceSection {
        title: "Resources & Support",
        summary: "Find support groups and forums.",
        body: "Links to online resources, forums, and local support groups for emotional \
               and practical support.",
    },
    AdviceSection {
        title: "Contact a Specialist",
        summary: "Get expert help.",
        body: "How to get in touch with diabetes specialists or clinics, including \
               appointment booking, helplines, and telemedicine options.",
    },
    AdviceSection {
        title: "Stress Management",
        summary: "Tips to manage stress effectively.",
        body: "How stress can impact diabetes and ways to manage it, including \
               meditation and relaxation techniques.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_non_empty_and_unique() {
        let sections = sections();
        assert!(!sections.is_empty());
        for section in sections {
            assert!(!section.title.is_empty());
            assert!(!section.summary.is_empty());
            assert!(!section.body.is_empty());
        }
        let mut titles: Vec<_> = sections.iter().map(|s| s.title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), sections.len());
    }
}
