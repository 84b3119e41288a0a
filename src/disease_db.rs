//! Static reference entries for the skin conditions the classifier knows.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disease {
    pub name: &'static str,
    pub description: &'static str,
    /// How to identify the condition, one bullet per line.
    pub detail: &'static str,
}

pub const TREATMENT_NOTE: &str = "Treatments vary depending on the severity and location of the disease. For mild cases, topical medications are commonly prescribed. Severe cases may require oral medications or even surgery.";

pub const DANGERS_NOTE: &str = "If left untreated, some skin conditions may worsen or lead to complications. In the case of certain conditions like melanoma, early detection is crucial for preventing life-threatening outcomes.";

const DISEASES: [Disease; 10] = [
    Disease {
        name: "Actinic Keratosis",
        description: "Actinic Keratosis are rough, scaly patches on the skin caused by excessive sun exposure.",
        detail: "Often found on sun-exposed areas like the face, lips, ears, neck, and forearms.\nThe patches are typically red, pink, or brown, and may feel itchy or tender.",
    },
    Disease {
        name: "Atopic Dermatitis",
        description: "Atopic Dermatitis (Eczema) is a condition that causes red, itchy skin, often flaring up periodically.",
        detail: "It usually appears in childhood and is often linked to allergies or asthma.\nAffected areas can become cracked, thickened, or scaly.",
    },
    Disease {
        name: "Benign Keratosis",
        description: "Benign Keratosis are non-cancerous skin growths that are often rough and wart-like.",
        detail: "Often found on older adults and appear waxy or scaly in texture.\nColors range from light tan to black, and they are often mistaken for skin cancer.",
    },
    Disease {
        name: "Dermatofibroma",
        description: "Dermatofibroma is a common benign skin growth that feels firm under the skin.",
        detail: "These small, round, reddish-brown nodules are usually found on the lower legs.\nThey may itch or become tender, and pressing on them may create a dimple-like indentation.",
    },
    Disease {
        name: "Melanocytic Nevus",
        description: "Melanocytic Nevus (moles) are benign skin growths that can be flat or raised.",
        detail: "Moles can vary in color from pink to dark brown.\nChanges in size, color, or shape should be monitored as they can signal melanoma.",
    },
    Disease {
        name: "Melanoma",
        description: "Melanoma is a dangerous form of skin cancer arising from melanocytes, often caused by UV exposure.",
        detail: "Look for asymmetrical moles, irregular borders, and a variety of colors.\nEarly detection is key as melanoma can spread to other parts of the body.",
    },
    Disease {
        name: "Squamous Cell Carcinoma",
        description: "Squamous Cell Carcinoma is a type of skin cancer that forms in the squamous cells of the skin.",
        detail: "Often appears as a firm, red nodule or a flat lesion with a scaly crust.\nCommonly caused by prolonged sun exposure and can spread if not treated.",
    },
    Disease {
        name: "Tinea (Ringworm)",
        description: "Tinea, commonly known as ringworm, is a fungal infection that causes a circular, red, and scaly rash.",
        detail: "The rash is often itchy and can spread across various parts of the body.\nIt is highly contagious and can be spread through direct contact with infected individuals or objects.",
    },
    Disease {
        name: "Candidiasis",
        description: "Candidiasis is a fungal infection caused by yeast, often affecting moist areas of the skin.",
        detail: "Common in skin folds, it can cause redness, swelling, and an itchy rash.\nIt is more prevalent in individuals with weakened immune systems or diabetes.",
    },
    Disease {
        name: "Vascular Lesion",
        description: "Vascular lesions are abnormal clusters of blood vessels visible on the skin's surface.",
        detail: "They can appear as red or purple spots and are often harmless.\nHowever, they can sometimes indicate underlying conditions like bleeding disorders.",
    },
];

pub fn all() -> &'static [Disease] {
    &DISEASES
}

pub fn find_by_name(name: &str) -> Option<&'static Disease> {
    let name = name.trim();
    DISEASES
        .iter()
        .find(|disease| disease.name.eq_ignore_ascii_case(name))
}

/// Looks up the entry for a formatted prediction such as
/// `"Melanoma (92.00% confidence)"`. Failure texts match nothing.
pub fn find_for_prediction(prediction: &str) -> Option<&'static Disease> {
    let label = match prediction.rfind(" (") {
        Some(index) if prediction.ends_with("% confidence)") => &prediction[..index],
        _ => return None,
    };
    find_by_name(label)
}
