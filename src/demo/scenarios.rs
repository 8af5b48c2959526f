//! Built-in presentation timelines, carried over from the live demo script.

use crate::models::{DemoEvent, DemoScenario, EventKind, EventValue};

fn event(offset_secs: u64, kind: EventKind, action: &str, message: &str) -> DemoEvent {
    DemoEvent {
        offset_secs,
        kind,
        action: action.to_string(),
        value: None,
        message: Some(message.to_string()),
    }
}

fn event_with(
    offset_secs: u64,
    kind: EventKind,
    action: &str,
    value: EventValue,
    message: &str,
) -> DemoEvent {
    DemoEvent {
        value: Some(value),
        ..event(offset_secs, kind, action, message)
    }
}

fn number(value: f64) -> EventValue {
    EventValue::Number(value)
}

fn text(value: &str) -> EventValue {
    EventValue::Text(value.to_string())
}

pub(crate) fn builtin_scenarios() -> Vec<DemoScenario> {
    vec![
        DemoScenario {
            name: "Sleep Transition Demo".to_string(),
            description: "Shows user falling asleep with automatic temperature adjustment"
                .to_string(),
            duration_secs: 120,
            events: vec![
                event(
                    0,
                    EventKind::System,
                    "start_monitoring",
                    "Sleep monitoring started - user in bed",
                ),
                event_with(
                    10,
                    EventKind::HeartRate,
                    "decrease",
                    number(68.0),
                    "Heart rate decreasing - relaxation detected",
                ),
                event_with(
                    25,
                    EventKind::Temperature,
                    "adjust",
                    number(22.5),
                    "Temperature lowered for sleep onset",
                ),
                event_with(
                    40,
                    EventKind::SleepPhase,
                    "change",
                    text("light"),
                    "Entering light sleep phase",
                ),
                event_with(
                    55,
                    EventKind::HeartRate,
                    "decrease",
                    number(62.0),
                    "Heart rate stabilized in sleep range",
                ),
                event_with(
                    70,
                    EventKind::SleepPhase,
                    "change",
                    text("deep"),
                    "Deep sleep phase achieved",
                ),
                event_with(
                    85,
                    EventKind::Temperature,
                    "fine_tune",
                    number(22.2),
                    "Micro-adjustment for optimal deep sleep",
                ),
                event(
                    110,
                    EventKind::System,
                    "energy_save",
                    "Entering energy-efficient monitoring mode",
                ),
            ],
        },
        DemoScenario {
            name: "Environmental Response Demo".to_string(),
            description: "Shows system responding to changing room conditions".to_string(),
            duration_secs: 90,
            events: vec![
                event_with(
                    0,
                    EventKind::Alert,
                    "co2_rise",
                    number(520.0),
                    "CO2 levels rising - poor ventilation detected",
                ),
                event(
                    15,
                    EventKind::System,
                    "ventilation_adjust",
                    "Activating smart ventilation response",
                ),
                event_with(
                    30,
                    EventKind::Temperature,
                    "compensate",
                    number(23.1),
                    "Temperature slightly increased due to air circulation",
                ),
                event(
                    45,
                    EventKind::System,
                    "cooling_activate",
                    "Cooling system activated to maintain target temperature",
                ),
                event_with(
                    60,
                    EventKind::Alert,
                    "co2_normal",
                    number(450.0),
                    "CO2 levels normalized - air quality improved",
                ),
                event_with(
                    75,
                    EventKind::Temperature,
                    "stabilize",
                    number(22.8),
                    "Temperature stabilized at optimal level",
                ),
            ],
        },
        DemoScenario {
            name: "Health Monitoring Demo".to_string(),
            description: "Demonstrates health monitoring and response capabilities".to_string(),
            duration_secs: 100,
            events: vec![
                event_with(
                    0,
                    EventKind::HeartRate,
                    "spike",
                    number(85.0),
                    "Elevated heart rate detected - possible stress or dream",
                ),
                event(
                    10,
                    EventKind::System,
                    "comfort_enhance",
                    "Enhancing comfort settings to promote relaxation",
                ),
                event_with(
                    20,
                    EventKind::Temperature,
                    "cool_slightly",
                    number(21.8),
                    "Slight cooling to help reduce stress response",
                ),
                event_with(
                    35,
                    EventKind::HeartRate,
                    "normalize",
                    number(72.0),
                    "Heart rate returning to normal range",
                ),
                event_with(
                    50,
                    EventKind::SleepPhase,
                    "change",
                    text("rem"),
                    "REM sleep phase detected - maintaining stable conditions",
                ),
                event_with(
                    65,
                    EventKind::HeartRate,
                    "rem_pattern",
                    number(68.0),
                    "Heart rate showing healthy REM sleep patterns",
                ),
                event(
                    80,
                    EventKind::System,
                    "optimize",
                    "All systems optimized for quality REM sleep",
                ),
            ],
        },
    ]
}
