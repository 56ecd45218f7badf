//! The **mode catalog**: one system instruction per [`Mode`].
//!
//! Every instruction is the shared preamble (role and output contract)
//! followed by mode-specific guidance: focus areas, target tools and a
//! worked input → output example that steers the style.
//!
//! ```rust
//! use enchanter_core::Mode;
//! use enchanter_prompt::modes::instruction_for;
//!
//! let text = instruction_for(Mode::Image);
//! assert!(text.contains("Midjourney"));
//! assert_eq!(text, instruction_for(Mode::Image));
//! ```

use enchanter_core::Mode;

use crate::builder::PromptBuilder;

const ROLE: &str = "You are a World-Class Prompt Engineer (The Enchanter). Your goal is to \
take simple, vague, or poorly constructed user inputs and transform them into highly effective, \
structured, and professional prompts optimized for Large Language Models (LLMs) or Image Generators.";

const OUTPUT_RULE: &str = "IMPORTANT: You must output ONLY valid JSON with exactly these three \
fields. No markdown, no thinking process, no conversational text.";

const OUTPUT_SKELETON: &str = r#"{
  "enhancedPrompt": "The full prompt text...",
  "explanation": "One sentence explaining the changes...",
  "suggestedTags": ["tag1", "tag2", "tag3"]
}"#;

/// Mode-specific half of an instruction.
struct Guidance {
    focus: &'static str,
    target: Option<&'static str>,
    example_input: &'static str,
    example_output: &'static str,
}

fn guidance(mode: Mode) -> Guidance {
    match mode {
        Mode::General => Guidance {
            focus: "Context setting, role assignment (Persona), task decomposition, \
                    chain-of-thought requirements, and output formatting.",
            target: None,
            example_input: "help me plan a diet",
            example_output: "Act as a professional nutritionist. Create a comprehensive 7-day meal \
                plan for a vegetarian adult looking to maintain weight. Include a grocery list, \
                calorie breakdown per day, and preparation tips. Ensure meals take less than 30 \
                minutes to cook.",
        },
        Mode::Image => Guidance {
            focus: "Visual details, lighting, art style, composition, aspect ratio, camera \
                    settings, and resolution (e.g., 8k, cinematic lighting).",
            target: Some("Midjourney v6, DALL-E 3, or Stable Diffusion XL."),
            example_input: "cat in space",
            example_output: "A hyper-realistic cinematic shot of a fluffy ginger cat floating in \
                zero-gravity inside a futuristic spaceship observatory, nebula clouds visible \
                through the giant glass dome, soft bioluminescent lighting, 8k resolution, Unreal \
                Engine 5 render style.",
        },
        Mode::Coding => Guidance {
            focus: "Specificity, edge cases, tech stack versions, clean code practices, error \
                    handling, and performance constraints.",
            target: Some("Expert developers and frontier coding models."),
            example_input: "make a python snake game",
            example_output: "Write a complete, single-file Python implementation of the classic \
                Snake game using the 'pygame' library. The code should include a game loop, \
                collision detection (walls and self), score tracking, and a restart mechanism. \
                Add comments explaining key logic sections. Ensure type hinting is used.",
        },
        Mode::Writing => Guidance {
            focus: "Persona, tone of voice, target audience, structural constraints (word count, \
                    formatting), and stylistic nuance.",
            target: None,
            example_input: "write an email to my boss about being late",
            example_output: "Draft a professional yet apologetic email to a supervisor explaining \
                a delay in arrival. The tone should be sincere but concise. Include a brief reason \
                (traffic/transit issue), an estimated arrival time, and reassurance that current \
                tasks will be managed. Keep it under 100 words.",
        },
        Mode::Social => Guidance {
            focus: "Viral hooks, short punchy sentences, engaging questions, formatting for \
                    readability (line breaks), and call-to-actions.",
            target: Some("LinkedIn, Twitter (X), or Instagram Captions."),
            example_input: "I learned to code",
            example_output: "I wasted 3 years trying to learn to code.\n\nHere is what I did \
                wrong (so you don't have to):\n\n1. Tutorial Hell\n2. Ignoring Documentation\n3. \
                Copying without understanding\n\nStop watching. Start building.\n\n#coding \
                #webdev #learnprogramming",
        },
        Mode::Design => Guidance {
            focus: "UI layouts, UX patterns, color palettes (hex codes), typography pairings, \
                    whitespace, accessibility, and modern trends (e.g., Bento grids, \
                    Glassmorphism, Brutalism).",
            target: Some("Frontend generation tools (v0, Lovable), Figma designers, or CSS developers."),
            example_input: "modern weather app",
            example_output: "A sleek, minimal weather dashboard in Dark Mode using a Bento Grid \
                layout.\n\nPalette:\n- Background: #0f172a (Slate 900)\n- Cards: #1e293b (Slate \
                800) with 10% transparency and blur (Glassmorphism)\n- Accents: #38bdf8 (Sky 400) \
                for sunny, #94a3b8 for cloudy.\n\nTypography: 'Inter' for UI elements, large thin \
                font for temperature.\nFeatures: Animated SVG weather icons, hourly forecast \
                slider, and a dynamic background gradient.",
        },
    }
}

/// The full system instruction for `mode`.
///
/// Pure and deterministic: the same mode always yields the same text.
pub fn instruction_for(mode: Mode) -> String {
    let guidance = guidance(mode);

    PromptBuilder::new()
        .add_line(ROLE)
        .add_blank_line()
        .add_section_h2("Output")
        .add_line(OUTPUT_RULE)
        .add_line("The JSON structure must be:")
        .add_text_json(OUTPUT_SKELETON)
        .add_blank_line()
        .add_section_h2(format!("Mode: {}", mode.label()))
        .add_key_value("Focus", guidance.focus)
        .add_key_value_opt("Target", guidance.target)
        .add_key_value(
            "Example",
            format!(
                "Input \"{}\" -> Output \"{}\"",
                guidance.example_input, guidance.example_output
            ),
        )
        .finalize()
}
