//! Prompt templates sent to the generation providers.

use crate::conversation::{Answers, Field};
use crate::locale::Locale;

/// System persona for the primary roadmap provider.
pub fn roadmap_persona(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "You are a career consultant. Compose a detailed personalized roadmap.",
        Locale::Ru => "Ты карьерный консультант. Составь детальный персонализированный роадмап.",
    }
}

/// Base roadmap prompt. Field order is fixed; missing answers render as `-`.
pub fn base_prompt(locale: Locale, answers: &Answers) -> String {
    let profession = answers.get_or_dash(Field::Profession);
    let experience = answers.get_or_dash(Field::Experience);
    let goals = answers.get_or_dash(Field::Goals);
    let skills = answers.get_or_dash(Field::Skills);
    let preferences = answers.get_or_dash(Field::Preferences);

    match locale {
        Locale::En => format!(
            "Compose a detailed career roadmap for profession {profession}. \
             Given the user's current experience: {experience}, \
             career goals: {goals}, current skills: {skills}, \
             and preferences: {preferences}. Include: \
             1) staged development plan \
             2) recommended learning resources \
             3) key skills to develop \
             4) networking recommendations \
             5) potential career tracks."
        ),
        Locale::Ru => format!(
            "Составь детальный карьерный роадмап для профессии {profession}. \
             Учитывая что у пользователя текущий опыт: {experience}, \
             карьерные цели: {goals}, текущие навыки: {skills}, \
             и предпочтения: {preferences}. Включи:\n\
             1. Поэтапный план развития\n\
             2. Рекомендуемые обучающие ресурсы\n\
             3. Ключевые навыки для развития\n\
             4. Рекомендации по нетворкингу\n\
             5. Потенциальные карьерные треки"
        ),
    }
}

/// Wrap the base prompt for the supplementary provider.
pub fn supplementary_prompt(locale: Locale, base: &str) -> String {
    match locale {
        Locale::En => format!("Give additional recommendations for this request: {base}"),
        Locale::Ru => format!("Дай дополнительные рекомендации для этого запроса: {base}"),
    }
}
