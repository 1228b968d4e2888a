//! Instruction contract sent to the command oracle
//!
//! Axis convention, in the robot base frame:
//! forward `+x`, back `-x`, left `+y`, right `-y`, up `+z`, down `-z`.
//!
//! Bump [`CONTRACT_VERSION`] whenever the wording or the examples change, so
//! logged prompts can be matched to the grammar they were written against.

pub const CONTRACT_VERSION: u32 = 2;

/// System role given to the oracle on every request.
pub const SYSTEM_ROLE: &str =
    "You are a robot command generator. Reply only with a command in the exact format you are given.";

/// Utterance/reply pairs embedded in the instruction.
pub const EXAMPLES: &[(&str, &str)] = &[
    ("go left 40", "[0, 40, 0]"),
    ("move back 25", "[-25, 0, 0]"),
    ("raise it by 10", "[0, 0, 10]"),
    ("open the gripper", "0"),
    ("grab it", "1"),
];

/// Build the user instruction for one utterance.
pub fn render_instruction(utterance: &str) -> String {
    let utterance = utterance.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = String::with_capacity(1024);
    out.push_str(
        "You will receive one spoken command, transcribed to text. \
         Produce exactly one command and nothing else.\n\
         If the command asks the arm to move in a direction, or only names a direction, \
         reply with the change of position in millimetres as a list of three numbers \
         [x, y, z], for example [100, 0, 0].\n\
         Directions: forward is +x and back is -x; left is +y and right is -y; \
         up is +z and down is -z. Axes that do not change are 0. \
         Write negative numbers with the ASCII minus sign '-'.\n\
         If the command asks to open the gripper, reply with 0. \
         If it asks to close the gripper or grab something, reply with 1.\n\
         Do not add words, units, quotes or code fences.\n\
         Examples:\n",
    );
    for (said, reply) in EXAMPLES {
        out.push_str("  \"");
        out.push_str(said);
        out.push_str("\" -> ");
        out.push_str(reply);
        out.push('\n');
    }
    out.push_str("The command is: ");
    out.push_str(&utterance);
    out
}
