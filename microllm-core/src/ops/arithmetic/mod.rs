//! Element-wise arithmetic and row-broadcast bias addition.

pub mod add;
pub mod add_bias;
pub mod mul;
pub mod scale;
pub mod sub;

pub use add::add_op;
pub use add_bias::add_bias_op;
pub use mul::mul_op;
pub use scale::scale_op;
pub use sub::sub_op;
