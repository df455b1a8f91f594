mod ast;
mod describe;
mod utils;

pub use describe::expand;

mod kw {
    use syn::custom_keyword;

    custom_keyword!(transparent);
    custom_keyword!(name);
    custom_keyword!(skip);
}
