pub mod task_board;
