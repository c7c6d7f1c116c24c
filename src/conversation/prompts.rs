//! Question text for each field.

use crate::locale::Locale;

use super::state::Field;

/// One entry of the questionnaire: a field and the question that asks for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub prompt: &'static str,
}

static EN_FIELDS: [FieldSpec; 5] = [
    FieldSpec {
        field: Field::Profession,
        prompt: "📌 Which profession or position would you like a roadmap for?",
    },
    FieldSpec {
        field: Field::Experience,
        prompt: "🎯 What is your current experience level?\n(beginner/intermediate/professional)",
    },
    FieldSpec {
        field: Field::Goals,
        prompt: "🚀 What are the main career goals you want to reach in the next 3 years?",
    },
    FieldSpec {
        field: Field::Skills,
        prompt: "💡 List your current key skills (comma separated):",
    },
    FieldSpec {
        field: Field::Preferences,
        prompt: "🌟 Any special preferences or constraints?\n(remote work, industry, etc.)",
    },
];

static RU_FIELDS: [FieldSpec; 5] = [
    FieldSpec {
        field: Field::Profession,
        prompt: "📌 Назовите профессию или должность, для которой хотите получить роадмап:",
    },
    FieldSpec {
        field: Field::Experience,
        prompt: "🎯 Какой у вас текущий уровень опыта?\n(начинающий/средний/профессионал)",
    },
    FieldSpec {
        field: Field::Goals,
        prompt: "🚀 Какие главные карьерные цели вы хотите достичь в ближайшие 3 года?",
    },
    FieldSpec {
        field: Field::Skills,
        prompt: "💡 Перечислите ваши текущие ключевые навыки (через запятую):",
    },
    FieldSpec {
        field: Field::Preferences,
        prompt: "🌟 Есть ли особые предпочтения или ограничения?\n(удаленная работа, индустрия и т.д.)",
    },
];

/// The questionnaire for `locale`, in question order.
pub fn field_specs(locale: Locale) -> &'static [FieldSpec; 5] {
    match locale {
        Locale::En => &EN_FIELDS,
        Locale::Ru => &RU_FIELDS,
    }
}

/// Question text for `field`.
pub fn question(locale: Locale, field: Field) -> &'static str {
    field_specs(locale)[field.index()].prompt
}
