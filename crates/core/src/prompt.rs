//! Prompt templates for the completion service.
//!
//! The structural requirements embedded here (30 fps, the exported
//! `compositionConfig` object, frame-based animation only, composition id
//! without underscores or hyphens) are consumed by the render backend.
//! They are a contract, not style guidance: do not reword them.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::format::Dimensions;
use crate::types::GenerationRequest;

/// System framing for the synthesis call.
pub const GENERATION_SYSTEM_PROMPT: &str =
    "You are an expert Remotion developer. Generate clean TSX code following the structure exactly.";

/// System framing for the revision call.
pub const REVISION_SYSTEM_PROMPT: &str =
    "You are an expert Remotion developer. Revise code based on feedback.";

/// Sentence used in place of the asset list when there are no assets.
pub const NO_ASSETS_SENTENCE: &str = "No external assets - generate everything with code.";

/// Render the asset manifest as a markdown bullet list.
pub fn format_assets(assets: &BTreeMap<String, String>) -> String {
    if assets.is_empty() {
        return NO_ASSETS_SENTENCE.to_string();
    }
    assets
        .iter()
        .map(|(name, location)| format!("- **{name}**: {location}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the synthesis prompt for `request`.
///
/// Deterministic: identical inputs always give identical text. Fails only
/// if `dimensions` has a zero side.
pub fn build_generation_prompt(
    request: &GenerationRequest,
    composition_id: &str,
    component_name: &str,
    dimensions: Dimensions,
) -> Result<String, CoreError> {
    let Dimensions { width, height } = Dimensions::new(dimensions.width, dimensions.height)?;

    let video_context = &request.video_context;
    let instruction = &request.instruction;
    let style = &request.style;
    let duration = request.duration_secs;
    let format_label = request.format.label();
    let assets_section = format_assets(&request.assets);

    Ok(format!(
        r##"# Remotion TSX Video Generator

You are an expert Remotion video developer. Generate production-ready TSX code.

## Context

**Video Context:**
{video_context}

**What to Create:**
{instruction}

**Style:** {style}

## Specs

- **Duration**: {duration} seconds
- **Format**: {format_label} ({width}x{height})
- **FPS**: 30

## Available Assets

{assets_section}

## Code Structure (MANDATORY)

```tsx
import React from 'react';
import {{ useCurrentFrame, useVideoConfig, interpolate, Easing, AbsoluteFill }} from 'remotion';

export const compositionConfig = {{
  id: '{composition_id}',
  durationInSeconds: {duration},
  fps: 30,
  width: {width},
  height: {height},
}};

const {component_name}: React.FC = () => {{
  const frame = useCurrentFrame();
  const {{ fps, durationInFrames }} = useVideoConfig();

  // Animations here...

  return (
    <AbsoluteFill style={{{{ backgroundColor: '#1a1a2e' }}}}>
      {{/* Content */}}
    </AbsoluteFill>
  );
}};

export default {component_name};
```

## Rules

Code structure mandatory
Your output MUST follow this exact structure and sections:

```tsx
import React from 'react';
import {{ useCurrentFrame, useVideoConfig, interpolate, Easing, AbsoluteFill }} from 'remotion';

// =============================================================================
// COMPOSITION CONFIG (Required for auto-discovery)
// =============================================================================
export const compositionConfig = {{
  id: '[UniqueComponentName]',
  durationInSeconds: [1-5],
  fps: 30,
  width: 1080,
  height: 1920,
}};

// =============================================================================
// PRE-GENERATED DATA (if needed - computed once, NOT during render)
// =============================================================================
const seededRandom = (seed: number): number => {{
  const x = Math.sin(seed * 9999) * 10000;
  return x - Math.floor(x);
}};

// [Any arrays/objects for particles, items, etc. go here]

// =============================================================================
// MAIN COMPONENT
// =============================================================================
const [ComponentName]: React.FC = () => {{
  const frame = useCurrentFrame();
  const {{ fps, durationInFrames }} = useVideoConfig();

  // Animation calculations here...

  return (
    <AbsoluteFill style={{{{ backgroundColor: '#...' }}}}>
      {{/* Content */}}
    </AbsoluteFill>
  );
}};

export default [ComponentName];
```

Animation rules

1. ALL animations must be frame based using useCurrentFrame() and interpolate()
2. NEVER use useState, useEffect, setTimeout, or CSS animations
3. Use extrapolateLeft: 'clamp' and extrapolateRight: 'clamp' to prevent value overflow
4. Use Easing functions for professional motion (example Easing.out(Easing.cubic))
5. Stagger animations logically, do not animate everything at once
6. The composition ID cannot have underscores or hyphens
7. Make sure text components are clear and big enough to be seen on mobile screens

Layout rules

1. Use AbsoluteFill as the root container
2. Position elements with position: absolute and percentage based positioning
3. Reserve safe zones: top 10%, bottom 15% for platform UI overlays
4. Center important content vertically between 25% and 75% of screen height
5. Use transform: translate(-50%, -50%) with left: 50% for true centering

Typography guidelines
Headlines
72 to 120px, bold, high contrast

Subheadlines
36 to 48px

Body text
28 to 36px minimum for readability

Additional typography rules
Always set margin: 0 on text elements
Use textAlign: 'center' for centered layouts

Quality standards
Professional color schemes, avoid pure #000000 or #FFFFFF as backgrounds
Subtle background elements like gradients or particles to add depth
Text shadows or glows to improve readability
Smooth easing on all transitions

Final output rule
Generate ONLY the complete TSX code. No explanations before or after.
"##
    ))
}

/// Build the revision prompt: the full original code plus the feedback.
pub fn build_revision_prompt(original_code: &str, feedback: &str) -> String {
    format!(
        r##"Revise this Remotion code based on user feedback.

**Current Code:**
```tsx
{original_code}
```

**User Feedback:**
{feedback}

Apply the requested changes while maintaining:
- Same structure and composition config
- Frame-based animations
- Same component name and composition ID
- Professional quality

Return ONLY the complete revised code. No explanations.
"##
    )
}
