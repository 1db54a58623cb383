pub mod checkpoint;
pub mod option_market;
pub mod position_token;
pub mod receiver;
pub mod stable_asset;
