mod search_area;
pub use search_area::SearchArea;

mod toilets;
pub use toilets::Toilets;
