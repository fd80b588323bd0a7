//! Id command implementation

use vocadeck_core::identity::DECK_ID_BITS;
use vocadeck_core::{IDENTITY_SCHEME, audio_filename, deck_id, derive};

pub fn run_id(text: &str) {
    let id = derive(text);
    println!("scheme:     {}", IDENTITY_SCHEME);
    println!("stable id:  {}", id);
    println!("deck id:    {} ({} bits)", deck_id(text), DECK_ID_BITS);
    println!("audio file: {}", audio_filename(text));
}
