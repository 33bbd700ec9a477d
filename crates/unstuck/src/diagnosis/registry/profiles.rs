use super::ProfileSeed;

pub(super) const PROFILES: &[ProfileSeed] = &[
    ProfileSeed {
        tag: "OVERTHINK",
        name: "Overthinking Stall",
        catch: "The search for the right answer never ends in your head, so starting keeps slipping.",
        why: "You would rather be convinced before moving than sit with ambiguity, so you stall in preparation.",
        stop: &[
            "Building a perfect plan before you start",
            "Comparing options endlessly in search of the optimal one",
        ],
        today: &[
            "Start for just 5 minutes (rough is an acceptable starting condition)",
            "Break the task down to the next single move only",
        ],
        this_week: &[
            "Adopt a 'submit at 60 points' rule",
            "When unsure, switch to a decide-tentatively-then-verify flow",
        ],
        this_month: &[
            "Fix three decision criteria you apply before starting",
            "Review weekly and update those criteria",
        ],
        ai_use: &[
            "Ask AI to compare the pros and cons of options A and B and propose a tentative decision",
            "Ask AI to turn the work into a list of next-move-only tasks",
        ],
    },
    ProfileSeed {
        tag: "PERFECT",
        name: "Perfectionist Jam",
        catch: "Demanding the finished form makes everything in between painful.",
        why: "The stronger your attachment to quality, the heavier it becomes to start.",
        stop: &[
            "Trying to build the finished version from the first pass",
            "Aiming to get it right in one shot",
        ],
        today: &[
            "Make one throwaway draft, expecting to discard it",
            "Decide the minimum form you would publish or submit",
        ],
        this_week: &[
            "Build in two passes: rough, then polish",
            "Write down the 'good enough here' line every time",
        ],
        this_month: &[
            "Stabilize quality with templates",
            "Fix your review criteria to cut rework",
        ],
        ai_use: &[
            "Ask AI for output in two stages: a rough draft, then improvements",
            "Ask AI to write a checklist of completion criteria",
        ],
    },
    ProfileSeed {
        tag: "INFO",
        name: "Research Rabbit Hole",
        catch: "The more you research, the more anxious you get, and the less you move.",
        why: "Gathering information to avoid failure keeps pushing action back.",
        stop: &[
            "Researching with no time limit",
            "Hopping from article to article",
        ],
        today: &[
            "Cut research off with a 15-minute timer",
            "Decide on one thing to try right now",
        ],
        this_week: &[
            "Limit yourself to three information sources",
            "Keep a log of what you tried and what happened",
        ],
        this_month: &[
            "Run a weekly read, try, summarize loop",
            "Rework what you learn into your own notes",
        ],
        ai_use: &[
            "Ask AI to summarize into three key points plus one next experiment",
            "Ask AI to build a comparison table to cut the hesitation",
        ],
    },
    ProfileSeed {
        tag: "PRIORITY",
        name: "Lost in Priorities",
        catch: "There is so much to do that you stall deciding where to begin.",
        why: "Tasks run in parallel and importance is tangled up with urgency.",
        stop: &[
            "Trying to do everything",
            "Starting while today's work is still vague",
        ],
        today: &[
            "Pick exactly one winning task for today",
            "Move everything else to a parked list",
        ],
        this_week: &[
            "Decide the week's top three first",
            "Group tasks into outcome-sized units",
        ],
        this_month: &[
            "Break quarterly goals down into months and weeks",
            "Grow a not-to-do list",
        ],
        ai_use: &[
            "Ask AI to sort tasks by importance and urgency and suggest today's one",
            "Ask AI to break the work down into the next three steps",
        ],
    },
    ProfileSeed {
        tag: "ENERGY",
        name: "Running on Empty",
        catch: "It is not willpower you are short on, it is stamina.",
        why: "When sleep, meals and rest fall apart, judgment and focus drop with them.",
        stop: &[
            "Packing your schedule while exhausted",
            "Putting heavy tasks late at night",
        ],
        today: &[
            "Do the lightest task for just 5 minutes",
            "Schedule recovery first: a bath, a walk, some water",
        ],
        this_week: &[
            "Pin focus work to mornings or right after recovery",
            "Set a minimum line for sleep",
        ],
        this_month: &[
            "Turn a routine that clears fatigue into a template",
            "Design a recover-then-focus rhythm",
        ],
        ai_use: &[
            "Ask AI to plan a day around your energy, light tasks first",
            "Ask AI to write low-energy versions of your procedures",
        ],
    },
    ProfileSeed {
        tag: "TIME",
        name: "Fragmented Time",
        catch: "You can't get a solid block of time, so progress never accumulates.",
        why: "Family, work and side projects interrupt constantly. It needs deliberate design.",
        stop: &[
            "Waiting until you get a solid block of time",
            "Planning work that assumes no interruptions",
        ],
        today: &[
            "Carve out a minimal task that finishes in 15 minutes",
            "Shape the work so you can resume after an interruption",
        ],
        this_week: &[
            "Reserve a fixed small slot just three times a week",
            "Modularize tasks so they move forward in short bursts",
        ],
        this_month: &[
            "Fix a place, a time and a procedure for the work",
            "Agree operating rules that fit around family and schedule",
        ],
        ai_use: &[
            "Ask AI to split the work into 15-minute tasks",
            "Ask AI to write a resume procedure for after interruptions",
        ],
    },
    ProfileSeed {
        tag: "DISTRACT",
        name: "Scattered Attention",
        catch: "Notifications, social media and noise keep breaking your focus.",
        why: "In a high-stimulus environment the brain keeps paying switching costs.",
        stop: &[
            "Working with notifications on",
            "Aiming for long focus sessions from the start",
        ],
        today: &[
            "Focus for just 10 minutes with notifications off",
            "Write what you are about to do in one line before starting",
        ],
        this_week: &[
            "Keep focus blocks short and fixed (10, then 15, then 20 minutes)",
            "Change where your phone lives",
        ],
        this_month: &[
            "Template your focus environment: place, sound, time",
            "Fix an entry routine for focused work",
        ],
        ai_use: &[
            "Ask AI to write a checklist for starting work",
            "Ask AI to write a recovery procedure for the moment you get stuck",
        ],
    },
    ProfileSeed {
        tag: "MOTIVATION",
        name: "Lost Sense of Purpose",
        catch: "Your motivation swings widely and nothing lasts.",
        why: "When purpose and feedback are invisible, the brain lowers the priority.",
        stop: &[
            "Pushing hard while the goal is vague",
            "Quitting before results show up",
        ],
        today: &[
            "Write why you are doing this in one line",
            "Pick a task whose result is visible within 5 minutes",
        ],
        this_week: &[
            "Make progress visible with checks, logs or a calendar",
            "Set up a way to reward small wins",
        ],
        this_month: &[
            "Redefine the goal in a form that matters to your daily life",
            "Revisit and fine-tune the purpose weekly",
        ],
        ai_use: &[
            "Ask AI to help put your purpose into one line",
            "Ask AI to design this week's small wins",
        ],
    },
];
