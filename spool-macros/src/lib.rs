//! Macros for use with spool.

extern crate proc_macro;

use proc_macro::TokenStream;

mod entry;

/// Run the annotated function as the root task of a spool runtime.
#[proc_macro_attribute]
pub fn main(_args: TokenStream, item: TokenStream) -> TokenStream {
    entry::main_impl(item)
}
