use symptom_relay::infrastructure::llm::{IMAGE_OBSERVATION_PROMPT, SYMPTOM_TEXT_PROMPT, symptom_prompt};

#[test]
fn given_symptoms_when_building_prompt_then_prefix_precedes_user_text() {
    let prompt = symptom_prompt("  fièvre et toux  ");

    assert!(prompt.starts_with(SYMPTOM_TEXT_PROMPT));
    assert!(prompt.ends_with("fièvre et toux"));
}

#[test]
fn given_text_prompt_when_reading_rules_then_forbids_diagnosis_and_recommends_professional() {
    assert!(SYMPTOM_TEXT_PROMPT.contains("diagnostic"));
    assert!(SYMPTOM_TEXT_PROMPT.contains("professionnel"));
}

#[test]
fn given_image_prompt_when_reading_rules_then_states_image_alone_cannot_diagnose() {
    assert!(IMAGE_OBSERVATION_PROMPT.contains("image seule ne permet pas"));
    assert!(IMAGE_OBSERVATION_PROMPT.contains("observations visuelles"));
}
