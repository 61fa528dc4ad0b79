pub mod card;
pub mod hints;
pub mod input_select;
pub mod instructions;
pub mod money;
pub mod toast;
pub mod transactions;
pub mod view_more;
