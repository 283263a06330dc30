//! Static FAQ catalog shown by the interaction layer.

/// One question/answer pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqItem {
    pub question: &'static str,
    pub answer: &'static str,
}

const FAQ_ITEMS: [FaqItem; 4] = [
    FaqItem {
        question: "What is this app for?",
        answer: "This app helps you manage knowledge entries, view documents, and access FAQs.",
    },
    FaqItem {
        question: "How do I add a knowledge entry?",
        answer: "Go to the Knowledge Management tab and fill in the title and content.",
    },
    FaqItem {
        question: "What file types can I upload?",
        answer: "You can upload PDF and TXT files in the Document Upload tab.",
    },
    FaqItem {
        question: "Can I share this app with others?",
        answer: "Yes, you can deploy it using Streamlit Cloud and share the URL.",
    },
];

/// Returns the FAQ list in display order.
pub fn faq_items() -> &'static [FaqItem] {
    &FAQ_ITEMS
}
