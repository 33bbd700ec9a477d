use super::{OptionSeed, QuestionSeed};

const fn pick(label: &'static str, weights: super::WeightSeed) -> OptionSeed {
    OptionSeed { label, weights }
}

const fn core(
    id: &'static str,
    title: &'static str,
    subtitle: &'static str,
    a: OptionSeed,
    b: OptionSeed,
) -> QuestionSeed {
    QuestionSeed {
        id,
        title,
        subtitle: Some(subtitle),
        a,
        b,
    }
}

const fn extra(id: &'static str, title: &'static str, a: OptionSeed, b: OptionSeed) -> QuestionSeed {
    QuestionSeed {
        id,
        title,
        subtitle: None,
        a,
        b,
    }
}

pub(super) const CORE: &[QuestionSeed] = &[
    core(
        "q1",
        "Before you start, which is closer?",
        "How you start",
        pick(
            "I can't move until I see the whole picture",
            &[("OVERTHINK", 2), ("INFO", 1)],
        ),
        pick("I just start poking at it", &[]),
    ),
    core(
        "q2",
        "When do you stall?",
        "Shape of the jam",
        pick(
            "I hesitate, sensing there is a better way",
            &[("OVERTHINK", 2), ("INFO", 1), ("PRIORITY", 1)],
        ),
        pick(
            "If I can't do it perfectly, I don't want to ship it",
            &[("PERFECT", 3)],
        ),
    ),
    core(
        "q3",
        "When tasks pile up?",
        "Organizing habits",
        pick(
            "Priorities never settle and everything scatters",
            &[("PRIORITY", 3), ("OVERTHINK", 1)],
        ),
        pick(
            "I wear myself out trying to grasp everything first",
            &[("INFO", 2), ("ENERGY", 1)],
        ),
    ),
    core(
        "q4",
        "What breaks your focus?",
        "Focus environment",
        pick(
            "Notifications and other errands keep interrupting",
            &[("DISTRACT", 3), ("TIME", 1)],
        ),
        pick("Fatigue stops my head from working", &[("ENERGY", 3)]),
    ),
    core(
        "q5",
        "How do you find time?",
        "Time design",
        pick(
            "Nothing moves without a solid block of time",
            &[("TIME", 3), ("OVERTHINK", 1)],
        ),
        pick("I can build up progress in short bursts", &[]),
    ),
    core(
        "q6",
        "What usually happens when you pick up something new to learn?",
        "Learning habits",
        pick(
            "The more I gather, the more anxious I get",
            &[("INFO", 3), ("OVERTHINK", 1)],
        ),
        pick(
            "My motivation swings and it doesn't last",
            &[("MOTIVATION", 3), ("ENERGY", 1)],
        ),
    ),
    core(
        "q7",
        "When you submit or publish?",
        "Output",
        pick("I'd ship at 60 points and improve it afterwards", &[]),
        pick(
            "If I ship it, it has to be finished to my satisfaction",
            &[("PERFECT", 3), ("OVERTHINK", 1)],
        ),
    ),
    core(
        "q8",
        "When you decide?",
        "Decision style",
        pick(
            "I want to compare and find the optimal answer",
            &[("OVERTHINK", 2), ("INFO", 1)],
        ),
        pick("I decide tentatively and adjust as I go", &[]),
    ),
    core(
        "q9",
        "When work needs redoing?",
        "Rework",
        pick(
            "I'd rather design it properly up front to avoid it",
            &[("OVERTHINK", 1), ("PERFECT", 1)],
        ),
        pick("Ship first, then fix", &[]),
    ),
    core(
        "q10",
        "You on a busy day?",
        "Current state",
        pick(
            "I'm motivated but nothing moves",
            &[("OVERTHINK", 1), ("PRIORITY", 1), ("TIME", 1)],
        ),
        pick(
            "I have no energy and can't get going",
            &[("ENERGY", 2), ("MOTIVATION", 1)],
        ),
    ),
];

pub(super) const SUPPLEMENTARY: &[(&str, QuestionSeed)] = &[
    (
        "OVERTHINK",
        extra(
            "ex_overthink_1",
            "When you're unsure?",
            pick(
                "I stop until I have convincing grounds",
                &[("OVERTHINK", 3)],
            ),
            pick("I can decide tentatively and move on", &[]),
        ),
    ),
    (
        "PERFECT",
        extra(
            "ex_perfect_1",
            "Your quality bar?",
            pick("High standards, always aiming higher", &[("PERFECT", 3)]),
            pick("I adjust it to what the work is for", &[]),
        ),
    ),
    (
        "INFO",
        extra(
            "ex_info_1",
            "Research?",
            pick("I keep extending it and time melts away", &[("INFO", 3)]),
            pick("I can time-box it and try things", &[]),
        ),
    ),
    (
        "PRIORITY",
        extra(
            "ex_priority_1",
            "When the to-do list grows?",
            pick("Everything looks equally important", &[("PRIORITY", 3)]),
            pick("I can narrow it to the top one", &[]),
        ),
    ),
    (
        "ENERGY",
        extra(
            "ex_energy_1",
            "Signs of fatigue?",
            pick("I know I'm short on sleep and recovery", &[("ENERGY", 3)]),
            pick("Even tired, I can push through", &[]),
        ),
    ),
    (
        "TIME",
        extra(
            "ex_time_1",
            "Interruptions?",
            pick("They're frequent and resuming takes a while", &[("TIME", 3)]),
            pick("I get right back after an interruption", &[]),
        ),
    ),
    (
        "DISTRACT",
        extra(
            "ex_distract_1",
            "Your environment?",
            pick("If my phone is nearby I end up touching it", &[("DISTRACT", 3)]),
            pick("I can let notifications pass", &[]),
        ),
    ),
    (
        "MOTIVATION",
        extra(
            "ex_motivation_1",
            "Why don't things stick?",
            pick(
                "I stall when I can't see meaning or progress",
                &[("MOTIVATION", 3)],
            ),
            pick("Once I decide, I keep going", &[]),
        ),
    ),
];
