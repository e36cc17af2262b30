/*!
 * Provider implementation tests
 */

pub mod gemini_test;
pub mod telegram_test;
