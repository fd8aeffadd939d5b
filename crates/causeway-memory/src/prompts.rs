//! Prompt builders for sessions, protocol summaries, and journal exports.
//!
//! Wording is not a contract. What matters is that the session prompt asks
//! for a trailing `{"memory_updates": {...}}` object keyed by record name.

use causeway_core::RecordName;

const SESSION_SYSTEM_PREAMBLE: &str = "You are a trauma-informed therapist specializing in climate anxiety. \
You manage your own persistent memory: read it before responding, decide what is worth \
remembering, and report your updates at the end of every session. Do not ask permission to \
remember something that matters clinically.";

const SESSION_PROTOCOL: &str = "Before responding, review past sessions and current goals, note which \
interventions have and have not worked, and look for patterns in the participant's triggers. \
Respond with warmth, validation, and clinical precision, personalized by what you remember.";

/// System instruction for a session; embeds the subject's full memory.
pub fn session_system(memory_context: &str) -> String {
    format!("{SESSION_SYSTEM_PREAMBLE}\n\nYour memory records are:\n{memory_context}\n\n{SESSION_PROTOCOL}")
}

/// User turn for a session.
pub fn session_message(session_number: u32, participant_input: &str) -> String {
    let record_lines = RecordName::ALL
        .iter()
        .map(|record| format!("    \"{}\": \"{}\"", record.file_name(), update_hint(*record)))
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        "SESSION #{session_number}\n\nParticipant says:\n\"{participant_input}\"\n\n\
Please:\n\
1. Respond therapeutically (warm, validating, insightful)\n\
2. Reference previous sessions if relevant\n\
3. Suggest evidence-based interventions, especially those that worked before\n\
4. End with your memory updates as JSON, including only records that changed:\n\n\
{{\n  \"memory_updates\": {{\n{record_lines}\n  }}\n}}"
    )
}

fn update_hint(record: RecordName) -> &'static str {
    match record {
        RecordName::Assessment => "full replacement assessment, if clinical picture changed",
        RecordName::InterventionsTested => "new intervention and its result",
        RecordName::ProtocolEvolution => "how your approach changed",
        RecordName::Sessions => "notes for this session",
        RecordName::TherapeuticGoals => "goals that shifted",
    }
}

pub const SUMMARY_SYSTEM: &str =
    "You are a clinical documentation expert. Summarize the therapeutic protocol from persistent memory.";

/// Request for a JSON protocol digest.
pub fn summary_prompt(memory_context: &str) -> String {
    format!(
        "Based on the persistent memory below, provide a comprehensive therapeutic protocol summary:\n\n\
{memory_context}\n\n\
Respond with JSON only:\n\
{{\n\
  \"sessions_completed\": <number>,\n\
  \"clinical_pattern\": \"trajectory of the participant's anxiety\",\n\
  \"what_works\": [\"interventions that helped\"],\n\
  \"what_doesnt_work\": [\"approaches that failed\"],\n\
  \"current_therapeutic_approach\": \"how the approach has evolved\",\n\
  \"recommended_next_steps\": [\"based on progress and patterns\"],\n\
  \"breakthrough_moments\": [\"major shifts in understanding\"],\n\
  \"protocol_version\": \"current iteration of the protocol\"\n\
}}"
    )
}

pub const JOURNAL_SYSTEM: &str =
    "You are a compassionate therapist creating a therapeutic narrative.";

/// Request for a participant-facing narrative over a memory snapshot.
pub fn journal_prompt(snapshot_json: &str) -> String {
    format!(
        "Based on this participant's therapeutic journey:\n\n{snapshot_json}\n\n\
Write a compassionate, validating journal entry that summarizes their anxiety journey, \
highlights their coping victories, and acknowledges progress and strengths. \
Make it personal and warm: two or three paragraphs they can keep."
    )
}
