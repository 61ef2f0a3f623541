pub(crate) mod board_service;
