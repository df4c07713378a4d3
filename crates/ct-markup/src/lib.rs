// SPDX-License-Identifier: MIT
//
// ct-markup — the text layer of chromatext.
//
// Takes strings written in any of the inline color dialects and rewrites
// them into the one canonical stream a chat client renders:
//
//   &a  &l  &r               legacy codes, configurable delimiter
//   &#RGB  &#RRGGBB          delimited hex
//   &x&R&G&B                 delimited true color
//   {#name}  {#RRGGBB}       brace tags, resolved through a name table
//   {#a>}text{#b<}  {#m<>}   gradients and splice points
//
// then optionally squeezes the result down to the fewest tokens that
// render identically. Nothing here fails on malformed input: whatever a
// stage doesn't recognize passes through untouched.

pub mod convert;
pub mod delimiter;
pub mod error;
pub mod gradient;
pub mod minify;
pub mod pattern;
pub mod token;

pub use convert::{Converter, strip_canonical};
pub use delimiter::Delimiter;
pub use error::{Error, Result};
pub use gradient::gradient;
pub use minify::minify;
pub use token::Code;
