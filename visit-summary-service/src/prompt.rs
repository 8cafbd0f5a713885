//! Prompt assembly for the day summary.
//!
//! Pure string building: no I/O, no configuration. The handler passes the
//! result straight to the completion provider.

use crate::dtos::{PatientDetails, PatientVisit};

/// System message sent with every day summary request.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a clinical assistant that prepares concise, accurate daily schedule briefings for doctors.";

/// Fixed instructions placed ahead of the schedule.
pub const PROMPT_PREAMBLE: &str = "\
Summarize the following schedule of patient visits for today.
For each patient, begin the description with the patient's name, age, and gender.
Then briefly note the reason for today's visit, relevant conditions, medications, \
allergies, and what happened at the most recent previous visit.
Keep each patient description short and clinically focused.";

pub const SCHEDULE_HEADER: &str = "Today's schedule:";

pub const NO_PREVIOUS_VISITS: &str = "No previous visits";

pub const NEW_PATIENT: &str = "New patient - no medical history available";

/// Build the user prompt for a day of visits, one block per visit in input order.
pub fn build_prompt(visits: &[PatientVisit]) -> String {
    let mut prompt = String::with_capacity(PROMPT_PREAMBLE.len() + visits.len() * 256);
    prompt.push_str(PROMPT_PREAMBLE);
    prompt.push_str("\n\n");
    prompt.push_str(SCHEDULE_HEADER);
    prompt.push('\n');

    for (index, visit) in visits.iter().enumerate() {
        prompt.push('\n');
        write_visit_block(&mut prompt, index + 1, visit);
    }

    prompt
}

fn write_visit_block(out: &mut String, number: usize, visit: &PatientVisit) {
    out.push_str(&format!("Visit {}:\n", number));
    out.push_str(&format!("- Time: {}\n", visit.time));
    out.push_str(&format!("- Patient ID: {}\n", visit.patient_id));
    out.push_str(&format!("- Doctor: {}\n", visit.doctor));
    out.push_str(&format!("- Department: {}\n", visit.department));
    out.push_str(&format!("- Reason for visit: {}\n", visit.reason));

    match &visit.patient_details {
        Some(details) => write_patient_history(out, details),
        None => out.push_str(&format!("- {}.\n", NEW_PATIENT)),
    }
}

fn write_patient_history(out: &mut String, details: &PatientDetails) {
    out.push_str(&format!("- Name: {}\n", details.name));
    out.push_str(&format!("- Age: {}\n", details.age));
    out.push_str(&format!("- Gender: {}\n", details.gender));
    out.push_str(&format!("- Conditions: {}\n", join_or_none(&details.conditions)));
    out.push_str(&format!("- Medications: {}\n", join_or_none(&details.medications)));
    out.push_str(&format!("- Allergies: {}\n", join_or_none(&details.allergies)));

    match details.most_recent_visit() {
        Some(last) => out.push_str(&format!(
            "- Most recent visit ({}, {}, {}): {}\n",
            last.date, last.doctor, last.department, last.visit_summary
        )),
        None => out.push_str(&format!("- Most recent visit: {}\n", NO_PREVIOUS_VISITS)),
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::VisitDetails;

    fn visit(patient_id: &str, details: Option<PatientDetails>) -> PatientVisit {
        PatientVisit {
            time: "09:00".to_string(),
            patient_id: patient_id.to_string(),
            doctor: "Dr. Osei".to_string(),
            department: "Cardiology".to_string(),
            reason: "Follow-up".to_string(),
            patient_details: details,
        }
    }

    fn details(history: Vec<VisitDetails>) -> PatientDetails {
        PatientDetails {
            name: "Ada Lovelace".to_string(),
            age: 36,
            gender: "female".to_string(),
            conditions: vec!["arrhythmia".to_string(), "asthma".to_string()],
            medications: vec!["metoprolol".to_string()],
            allergies: vec![],
            visits: history,
        }
    }

    fn past_visit(date: &str, summary: &str) -> VisitDetails {
        VisitDetails {
            date: date.to_string(),
            doctor: "Dr. Osei".to_string(),
            department: "Cardiology".to_string(),
            reason: "Palpitations".to_string(),
            diagnoses: vec!["PVCs".to_string()],
            visit_summary: summary.to_string(),
        }
    }

    #[test]
    fn empty_schedule_has_preamble_and_header_only() {
        let prompt = build_prompt(&[]);

        assert!(prompt.starts_with(PROMPT_PREAMBLE));
        assert!(prompt.trim_end().ends_with(SCHEDULE_HEADER));
        assert!(!prompt.contains("Visit 1:"));
    }

    #[test]
    fn preamble_requires_name_age_and_gender_first() {
        assert!(PROMPT_PREAMBLE.contains("begin the description with the patient's name, age, and gender"));
    }

    #[test]
    fn known_patient_without_history_says_no_previous_visits() {
        let prompt = build_prompt(&[visit("p-1", Some(details(vec![])))]);

        assert!(prompt.contains("No previous visits"));
        assert!(prompt.contains("- Age: 36"));
        assert!(prompt.contains("- Gender: female"));
        assert!(prompt.contains("- Conditions: arrhythmia, asthma"));
        assert!(prompt.contains("- Medications: metoprolol"));
        assert!(prompt.contains("- Allergies: None"));
        assert!(!prompt.contains(NEW_PATIENT));
    }

    #[test]
    fn missing_details_renders_new_patient_placeholder() {
        let prompt = build_prompt(&[visit("p-2", None)]);

        assert!(prompt.contains("New patient - no medical history available"));
        assert!(!prompt.contains(NO_PREVIOUS_VISITS));
    }

    #[test]
    fn only_the_last_visit_summary_is_included() {
        let history = vec![
            past_visit("2023-11-02", "Initial workup, ordered Holter."),
            past_visit("2023-12-10", "Holter showed frequent PVCs."),
            past_visit("2024-01-03", "Started beta blocker."),
        ];
        let prompt = build_prompt(&[visit("p-1", Some(details(history)))]);

        assert!(prompt.contains("Started beta blocker."));
        assert!(prompt.contains("2024-01-03"));
        assert!(!prompt.contains("Initial workup, ordered Holter."));
        assert!(!prompt.contains("Holter showed frequent PVCs."));
    }

    #[test]
    fn new_patient_block_layout() {
        let prompt = build_prompt(&[visit("p-9", None)]);

        let expected = "\
Visit 1:
- Time: 09:00
- Patient ID: p-9
- Doctor: Dr. Osei
- Department: Cardiology
- Reason for visit: Follow-up
- New patient - no medical history available.
";
        assert!(prompt.ends_with(&format!("{}\n\n{}", SCHEDULE_HEADER, expected)));
    }

    #[test]
    fn most_recent_visit_line_names_date_doctor_and_department() {
        let history = vec![past_visit("2024-01-03", "Started beta blocker.")];
        let prompt = build_prompt(&[visit("p-1", Some(details(history)))]);

        assert!(prompt.ends_with(
            "- Most recent visit (2024-01-03, Dr. Osei, Cardiology): Started beta blocker.\n"
        ));
    }

    #[test]
    fn blocks_follow_input_order() {
        let prompt = build_prompt(&[
            visit("p-b", None),
            visit("p-a", Some(details(vec![]))),
            visit("p-c", None),
        ]);

        let b = prompt.find("Patient ID: p-b").unwrap();
        let a = prompt.find("Patient ID: p-a").unwrap();
        let c = prompt.find("Patient ID: p-c").unwrap();
        assert!(b < a && a < c);
        assert!(prompt.contains("Visit 3:"));
    }
}
