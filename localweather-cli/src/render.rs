use chrono::Local;
use localweather_core::{ConditionCode, FetchState, presentation_for};

pub const LOADING_TEXT: &str = "Fetching the weather...";

pub fn format_state(state: &FetchState) -> String {
    match state {
        FetchState::Loading => LOADING_TEXT.to_string(),
        FetchState::Ready(reading) => {
            let p = presentation_for(reading.condition);
            let mut out = format!(
                "[{}] {:.1}°C\n{}\n{}\n",
                p.icon.as_str(),
                reading.temperature_celsius,
                p.title,
                p.subtitle,
            );
            if let Some(name) = &reading.location_name {
                out.push_str(&format!("Location: {name}\n"));
            }
            out.push_str(&format!(
                "Observed: {}  Background: {}",
                reading.observed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                p.color.as_hex(),
            ));
            out
        }
        FetchState::Failed { reason } => format!("{}\n{}", reason.user_message(), reason.hint()),
    }
}

pub fn format_conditions() -> String {
    ConditionCode::all()
        .iter()
        .map(|code| {
            let p = presentation_for(*code);
            format!(
                "{:<12} {:<8} {:<22} {} - {}",
                code.as_str(),
                p.color.as_hex(),
                p.icon.as_str(),
                p.title,
                p.subtitle
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
