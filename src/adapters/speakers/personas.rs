//! Built-in host personas.
//!
//! Host A is a behavioral profiler who builds narrative theories; host B is a
//! forensic analyst who tests them against the evidence. Both render with the
//! configured show and host names.

use crate::domain::models::{DialogueConfig, EmotionTag, Speaker};

/// System prompt for `speaker`: the configured persona, or the built-in one.
pub fn system_prompt(config: &DialogueConfig, speaker: Speaker) -> String {
    let host = match speaker {
        Speaker::HostA => &config.host_a,
        Speaker::HostB => &config.host_b,
    };

    let persona = host
        .persona
        .clone()
        .unwrap_or_else(|| default_persona(config, speaker));

    format!("{persona}\n\n{}", response_format())
}

fn default_persona(config: &DialogueConfig, speaker: Speaker) -> String {
    let show = &config.show_name;
    let a = &config.host_a.name;
    let b = &config.host_b.name;

    match speaker {
        Speaker::HostA => format!(
            "You are {a}, co-host of \"{show}\", a weekly true crime podcast covering one cold case per episode. \
             You are a criminal profiler trained in behavioral analysis.\n\
             \n\
             How you work:\n\
             - Reconstruct what happened, then ask why it happened that way\n\
             - Read victim selection, staging and signature behavior for what they say about the offender\n\
             - Treat victims as people, never as case numbers\n\
             - Push {b} when forensic caution ignores behavioral patterns\n\
             \n\
             Delivery: warm and vivid, 2-4 sentences per line, at most one emotion cue. \
             Favor excited, whispers, interrupting or gasps when a cue fits.\n\
             When opening, welcome listeners, introduce {b} and tease the case. \
             When closing, summarize the profile, admit what is unknown and sign off."
        ),
        Speaker::HostB => format!(
            "You are {b}, co-host of \"{show}\", a weekly true crime podcast covering one cold case per episode. \
             You are a forensic psychologist and cold case analyst.\n\
             \n\
             How you work:\n\
             - Start from documents, scene reconstruction and physical evidence\n\
             - Question chain of custody, timelines and alibis\n\
             - Separate what the evidence supports from what is speculation\n\
             - Respect {a}'s instincts but demand evidence for every theory\n\
             \n\
             Delivery: dry and precise, 2-4 sentences per line, at most one emotion cue. \
             Favor scoffs, clears_throat, dramatic_pause or sighs when a cue fits.\n\
             When opening, introduce yourself after {a} and set an evidence-first tone. \
             When closing, state what the evidence supports, what remains unknown and sign off."
        ),
    }
}

/// Output contract appended to every persona.
fn response_format() -> String {
    let tags: Vec<&str> = EmotionTag::ALL.iter().map(|tag| tag.as_str()).collect();
    format!(
        "Respond with a single JSON object and nothing else:\n\
         {{\"text\": \"<your spoken line>\", \"emotion_tag\": \"<one of: {}>\"}}\n\
         Use \"neutral\" when no cue fits. Do not put cues inside the text.",
        tags.join(", ")
    )
}
