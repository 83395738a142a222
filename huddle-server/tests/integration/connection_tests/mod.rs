mod test_empty_room_is_discarded;
mod test_join_creates_room;
