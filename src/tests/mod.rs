mod dex_parse;
mod graph_cases;
mod session_cases;
