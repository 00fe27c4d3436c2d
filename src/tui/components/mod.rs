// Components module - dashboard building blocks
//
// Top to bottom: header, stage cards, concept cloud, toolbar, code strip,
// stock table, log strip. The toast overlays everything.
//
// Components are pure render functions over `App`; none of them mutate state.

pub mod code_strip;
pub mod concept_cloud;
pub mod formatters;
pub mod header;
pub mod log_strip;
pub mod stage_cards;
pub mod stock_table;
pub mod toast;
pub mod toolbar;
