pub mod inbox;
pub mod replies;
